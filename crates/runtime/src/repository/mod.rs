//! Storage for committed battle snapshots.
//!
//! Only the latest snapshot per battle is retained. Snapshots are stored
//! behind [`std::sync::Arc`] and replaced as whole values, so a reader holds
//! either the previous or the next snapshot, never a partially merged one.
mod error;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryBattleRepo;
pub use traits::BattleRepository;
