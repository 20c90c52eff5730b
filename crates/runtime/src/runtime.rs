//! High-level runtime orchestrator.
//!
//! The runtime owns the sync worker, wires up the command channel and event
//! bus, and exposes a builder-based API for clients to push feed frames.
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{Result, RuntimeError, SyncHandle};
use crate::config::SyncConfig;
use crate::events::SyncEventBus;
use crate::oracle::DexManager;
use crate::repository::{BattleRepository, InMemoryBattleRepo};
use crate::sync::Synchronizer;
use crate::workers::{Command, SyncWorker};

/// Main runtime that serializes sync requests.
///
/// [`SyncHandle`] provides a cloneable façade for clients.
pub struct SyncRuntime {
    handle: SyncHandle,
    repository: Arc<dyn BattleRepository>,
    config: SyncConfig,
    worker_handle: JoinHandle<()>,
}

impl SyncRuntime {
    /// Create a new runtime builder
    pub fn builder() -> SyncRuntimeBuilder {
        SyncRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> SyncHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Shared snapshot store, for readers that bypass the worker.
    pub fn repository(&self) -> Arc<dyn BattleRepository> {
        Arc::clone(&self.repository)
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker exits once every outstanding [`SyncHandle`] clone has
    /// been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`SyncRuntime`].
pub struct SyncRuntimeBuilder {
    config: SyncConfig,
    repository: Option<Arc<dyn BattleRepository>>,
    dex: Option<DexManager>,
}

impl SyncRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: SyncConfig::default(),
            repository: None,
            dex: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a shared snapshot store instead of a fresh in-memory one
    pub fn repository(mut self, repository: Arc<dyn BattleRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set required reference data
    pub fn dex(mut self, dex: DexManager) -> Self {
        self.dex = Some(dex);
        self
    }

    /// Build the runtime and spawn its worker
    pub fn build(self) -> Result<SyncRuntime> {
        let dex = self.dex.ok_or(RuntimeError::MissingDex)?;
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryBattleRepo::new()));

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = SyncEventBus::with_capacity(self.config.event_buffer_size);

        let handle = SyncHandle::new(command_tx, event_bus.clone());

        let synchronizer = Synchronizer::new(Arc::clone(&repository), dex, self.config.clone());
        let worker = SyncWorker::new(synchronizer, command_rx, event_bus);

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(SyncRuntime {
            handle,
            repository,
            config: self.config,
            worker_handle,
        })
    }
}
