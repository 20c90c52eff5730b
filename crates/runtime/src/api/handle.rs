//! Cloneable façade for issuing commands to the runtime.
//!
//! [`SyncHandle`] hides channel plumbing and offers async helpers for
//! registering battles, pushing feed frames, and reading snapshots.
use std::sync::Arc;

use battle_core::{BattleFeed, BattleId, BattleState};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::events::{SyncEvent, SyncEventBus};
use crate::sync::SyncOutcome;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct SyncHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: SyncEventBus,
}

impl SyncHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: SyncEventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Registers the empty canonical state of a new battle.
    ///
    /// Sync requests for a battle id fail until it has been registered.
    pub async fn register_battle(&self, state: BattleState) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Register {
                state: Box::new(state),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Merges one feed frame into its battle's committed snapshot.
    pub async fn sync(&self, feed: BattleFeed) -> Result<SyncOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Sync {
                feed: Box::new(feed),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Returns the committed snapshot of a battle, if registered.
    pub async fn snapshot(&self, battle_id: BattleId) -> Result<Option<Arc<BattleState>>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Snapshot {
                battle_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Drops a finished battle's snapshot.
    pub async fn remove_battle(&self, battle_id: BattleId) -> Result<Option<Arc<BattleState>>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Remove {
                battle_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Subscribe to commit/skip/abort notifications.
    ///
    /// Events are best-effort; a lagging receiver may miss some.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.event_bus.subscribe()
    }
}
