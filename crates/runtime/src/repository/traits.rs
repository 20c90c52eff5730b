//! Repository contract for committed battle snapshots.

use std::sync::Arc;

use battle_core::{BattleId, BattleState};

use super::Result;

/// Holds the committed snapshot of every active battle.
///
/// Implementations must make [`commit`](Self::commit) a whole-value swap.
pub trait BattleRepository: Send + Sync {
    /// Current committed snapshot of a battle.
    fn load(&self, battle_id: &BattleId) -> Result<Option<Arc<BattleState>>>;

    /// Registers a battle. Fails when the id is already present.
    fn insert(&self, state: BattleState) -> Result<Arc<BattleState>>;

    /// Replaces the committed snapshot and returns the new shared value.
    fn commit(&self, state: BattleState) -> Result<Arc<BattleState>>;

    /// Drops a battle's snapshot.
    fn remove(&self, battle_id: &BattleId) -> Result<Option<Arc<BattleState>>>;

    /// Ids of all registered battles, sorted.
    fn battle_ids(&self) -> Result<Vec<BattleId>>;

    fn exists(&self, battle_id: &BattleId) -> Result<bool> {
        Ok(self.load(battle_id)?.is_some())
    }
}
