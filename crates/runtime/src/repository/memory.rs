use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use battle_core::{BattleId, BattleState};

use super::{BattleRepository, RepositoryError, Result};

/// In-memory implementation of [`BattleRepository`].
#[derive(Default)]
pub struct InMemoryBattleRepo {
    battles: RwLock<HashMap<BattleId, Arc<BattleState>>>,
}

impl InMemoryBattleRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BattleRepository for InMemoryBattleRepo {
    fn load(&self, battle_id: &BattleId) -> Result<Option<Arc<BattleState>>> {
        let battles = self
            .battles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(battles.get(battle_id).cloned())
    }

    fn insert(&self, state: BattleState) -> Result<Arc<BattleState>> {
        let mut battles = self
            .battles
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if battles.contains_key(&state.battle_id) {
            return Err(RepositoryError::BattleExists(state.battle_id));
        }
        let state = Arc::new(state);
        battles.insert(state.battle_id.clone(), state.clone());
        Ok(state)
    }

    fn commit(&self, state: BattleState) -> Result<Arc<BattleState>> {
        let state = Arc::new(state);
        let mut battles = self
            .battles
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        battles.insert(state.battle_id.clone(), state.clone());
        Ok(state)
    }

    fn remove(&self, battle_id: &BattleId) -> Result<Option<Arc<BattleState>>> {
        let mut battles = self
            .battles
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(battles.remove(battle_id))
    }

    fn battle_ids(&self) -> Result<Vec<BattleId>> {
        let battles = self
            .battles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<_> = battles.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use battle_core::Format;

    use super::*;

    fn battle(id: &str) -> BattleState {
        BattleState::new(BattleId::new(id), Format::new("gen9ou"))
    }

    #[test]
    fn insert_rejects_duplicates() {
        let repo = InMemoryBattleRepo::new();
        repo.insert(battle("b1")).expect("first insert");
        assert!(matches!(
            repo.insert(battle("b1")),
            Err(RepositoryError::BattleExists(_))
        ));
    }

    #[test]
    fn commit_swaps_whole_snapshot() {
        let repo = InMemoryBattleRepo::new();
        let before = repo.insert(battle("b1")).expect("insert");

        let mut next = (*before).clone();
        next.p1.name = Some("Red".into());
        repo.commit(next).expect("commit");

        // An earlier reader keeps the old value
        assert_eq!(before.p1.name, None);
        let after = repo
            .load(&BattleId::new("b1"))
            .expect("load")
            .expect("present");
        assert_eq!(after.p1.name.as_deref(), Some("Red"));
        assert_eq!(repo.battle_ids().expect("ids"), vec![BattleId::new("b1")]);
        assert!(repo.remove(&BattleId::new("b1")).expect("remove").is_some());
        assert!(!repo.exists(&BattleId::new("b1")).expect("exists"));
    }
}
