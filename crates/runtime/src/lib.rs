//! Runtime orchestration for battle-state synchronization.
//!
//! This crate wires the pure reconcilers from `battle-core` to the
//! asynchronous pieces: learnset enrichment, the committed-snapshot
//! repository, and a single worker task that serializes sync requests.
//! Consumers embed [`SyncRuntime`] and talk to it through [`SyncHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`sync`] holds the controller and the enrichment step
//! - [`events`] broadcasts commit notifications
//! - [`workers`] keeps background tasks internal to the crate
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod config;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod sync;

mod workers;

pub use api::{Result, RuntimeError, SyncHandle};
pub use config::SyncConfig;
pub use events::{SyncEvent, SyncEventBus};
pub use oracle::{DexManager, InMemoryDex, JsonDex, Learnset, LearnsetOracle};
pub use repository::{BattleRepository, InMemoryBattleRepo, RepositoryError};
pub use runtime::{SyncRuntime, SyncRuntimeBuilder};
pub use sync::{SyncOutcome, Synchronizer, enrich_roster};
