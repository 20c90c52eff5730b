use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use battle_core::util::to_id;
use battle_core::{MoveOracle, OracleError};

use super::{Learnset, LearnsetOracle};

/// In-process reference data, assembled with builder calls.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDex {
    moves: BTreeMap<String, String>,
    learnsets: HashMap<String, Learnset>,
    failing: HashSet<String>,
}

impl InMemoryDex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a catalog entry (`"thunderbolt"`, `"Thunderbolt"`).
    pub fn with_move(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.moves.insert(id.into(), name.into());
        self
    }

    /// Adds a learnset for a species; move ids get a placeholder method.
    pub fn with_learnset<I, S>(mut self, species: &str, move_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let learnset = move_ids
            .into_iter()
            .map(|id| (id.into(), vec!["9M".to_string()]))
            .collect();
        self.learnsets.insert(to_id(species), learnset);
        self
    }

    /// Makes lookups for `species` reject.
    pub fn failing_for(mut self, species: &str) -> Self {
        self.failing.insert(to_id(species));
        self
    }
}

impl MoveOracle for InMemoryDex {
    fn move_name(&self, id: &str) -> Option<String> {
        self.moves.get(&to_id(id)).cloned()
    }

    fn move_ids(&self) -> Vec<String> {
        self.moves.keys().cloned().collect()
    }
}

#[async_trait]
impl LearnsetOracle for InMemoryDex {
    async fn learnable(&self, species_id: &str) -> Result<Option<Learnset>, OracleError> {
        if self.failing.contains(species_id) {
            return Err(OracleError::LookupFailed {
                species: species_id.to_string(),
                reason: "lookup rejected".into(),
            });
        }
        Ok(self.learnsets.get(species_id).cloned())
    }
}
