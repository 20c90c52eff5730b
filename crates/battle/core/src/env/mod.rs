//! Traits and context describing read-only reference data.
//!
//! The move catalog is a synchronous [`MoveOracle`]; the learnability index
//! is asynchronous and lives in the runtime crate. Neither is owned by a
//! battle: they are injected explicitly into the controller.
mod error;
mod format;
mod moves;

pub use error::OracleError;
pub use format::{Format, LATEST_GENERATION};
pub use moves::MoveOracle;
