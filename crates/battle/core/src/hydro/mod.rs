//! Stateless text codec for saved roster configurations.
//!
//! A preset dehydrates into `opcode~value` pairs joined by a delimiter, for
//! example `cid~a1b2,fme~Great Tusk,lvl~100,mov~Headlong Rush@0.9/Rapid Spin@0.8`.
//! The live synchronization path never calls into this module.
mod error;
mod preset;

pub use error::CodecError;
pub use preset::{DEFAULT_DELIMITER, Opcode, RosterPreset, dehydrate_preset, hydrate_preset};
