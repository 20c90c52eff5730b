//! Static game tables consulted during merging and by downstream tools.
mod abilities;
mod fusion;
mod natures;
mod species;

pub use abilities::{is_toggleable_ability, is_toggled};
pub use fusion::{FusionParts, fuse_base_stats, fusion_part_names};
pub use natures::{COMMON_NATURES, Nature, NatureStat};
pub use species::base_species;
