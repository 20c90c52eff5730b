//! Worker tasks that back the runtime orchestration.
//!
//! The sync worker owns the [`crate::Synchronizer`] and serializes every
//! request against it.

mod sync;

pub use sync::{Command, SyncWorker};
