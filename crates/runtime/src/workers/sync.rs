//! Sync worker that owns the [`Synchronizer`].
//!
//! Receives commands from [`crate::SyncHandle`], runs them strictly one at a
//! time, and publishes the outcome of each sync to the event bus. A request
//! that arrives while another is suspended in enrichment waits in the
//! channel until the earlier one has committed or aborted.
use std::sync::Arc;

use battle_core::{BattleFeed, BattleId, BattleState};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::api::Result;
use crate::events::{SyncEvent, SyncEventBus};
use crate::sync::{SyncOutcome, Synchronizer};

/// Commands that can be sent to the sync worker
pub enum Command {
    /// Register the initial canonical state of a battle.
    Register {
        state: Box<BattleState>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Merge one feed frame.
    Sync {
        feed: Box<BattleFeed>,
        reply: oneshot::Sender<Result<SyncOutcome>>,
    },
    /// Read the committed snapshot of a battle.
    Snapshot {
        battle_id: BattleId,
        reply: oneshot::Sender<Result<Option<Arc<BattleState>>>>,
    },
    /// Drop a battle's snapshot.
    Remove {
        battle_id: BattleId,
        reply: oneshot::Sender<Result<Option<Arc<BattleState>>>>,
    },
}

/// Background task that processes sync commands.
pub struct SyncWorker {
    synchronizer: Synchronizer,
    command_rx: mpsc::Receiver<Command>,
    event_bus: SyncEventBus,
}

impl SyncWorker {
    pub fn new(
        synchronizer: Synchronizer,
        command_rx: mpsc::Receiver<Command>,
        event_bus: SyncEventBus,
    ) -> Self {
        Self {
            synchronizer,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends once every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command).await;
        }
        debug!(target: "sync::worker", "Command channel closed, sync worker exiting");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Register { state, reply } => {
                let battle_id = state.battle_id.clone();
                let result = self
                    .synchronizer
                    .repository()
                    .insert(*state)
                    .map(|_| ())
                    .map_err(Into::into);
                if result.is_ok() {
                    debug!(target: "sync::worker", battle_id = %battle_id, "Registered battle");
                }
                if reply.send(result).is_err() {
                    debug!(target: "sync::worker", "Register reply channel closed (caller dropped)");
                }
            }
            Command::Sync { feed, reply } => {
                let result = self.synchronizer.sync(&feed).await;
                if let Ok(outcome) = &result {
                    self.publish(&feed, outcome);
                }
                if reply.send(result).is_err() {
                    debug!(target: "sync::worker", "Sync reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { battle_id, reply } => {
                let result = self
                    .synchronizer
                    .repository()
                    .load(&battle_id)
                    .map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!(target: "sync::worker", "Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Remove { battle_id, reply } => {
                let result = self
                    .synchronizer
                    .repository()
                    .remove(&battle_id)
                    .map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!(target: "sync::worker", "Remove reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn publish(&self, feed: &BattleFeed, outcome: &SyncOutcome) {
        let battle_id = outcome.snapshot().battle_id.clone();
        let token = feed.token;
        let event = match outcome {
            SyncOutcome::Committed(_) => SyncEvent::Committed { battle_id, token },
            SyncOutcome::Unchanged(_) => SyncEvent::Skipped { battle_id, token },
            SyncOutcome::FieldAborted(_) => SyncEvent::FieldAborted { battle_id, token },
        };
        self.event_bus.publish(event);
    }
}
