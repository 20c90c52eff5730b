//! The synchronization controller and its asynchronous enrichment step.
mod controller;
mod enrich;

pub use controller::{SyncOutcome, Synchronizer};
pub use enrich::{enrich_roster, partition_moves};
