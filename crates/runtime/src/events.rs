//! Broadcast notifications about sync outcomes.

use battle_core::{BattleId, ChangeToken};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Outcome of one sync request, published after the worker decides it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncEvent {
    /// A new snapshot was swapped in.
    Committed {
        battle_id: BattleId,
        token: Option<ChangeToken>,
    },
    /// The token matched the committed one; nothing was recomputed.
    Skipped {
        battle_id: BattleId,
        token: Option<ChangeToken>,
    },
    /// The field could not be established; the previous snapshot stays.
    FieldAborted {
        battle_id: BattleId,
        token: Option<ChangeToken>,
    },
}

impl SyncEvent {
    pub fn battle_id(&self) -> &BattleId {
        match self {
            SyncEvent::Committed { battle_id, .. }
            | SyncEvent::Skipped { battle_id, .. }
            | SyncEvent::FieldAborted { battle_id, .. } => battle_id,
        }
    }
}

/// Single-topic event bus.
#[derive(Clone)]
pub struct SyncEventBus {
    tx: broadcast::Sender<SyncEvent>,
}

impl SyncEventBus {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tx: broadcast::channel(capacity.max(1)).0,
        }
    }

    pub fn publish(&self, event: SyncEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!(target: "sync::worker", "No subscribers for sync event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.tx.subscribe()
    }
}

impl Default for SyncEventBus {
    fn default() -> Self {
        Self::with_capacity(100)
    }
}
