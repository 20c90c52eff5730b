use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use battle_core::util::to_id;
use battle_core::{MoveOracle, OracleError};
use serde::Deserialize;

use super::{Learnset, LearnsetOracle};
use crate::api::{Result, RuntimeError};

#[derive(Deserialize)]
struct DexFile {
    #[serde(default)]
    moves: BTreeMap<String, MoveEntry>,
    learnsets: Option<HashMap<String, Learnset>>,
}

#[derive(Deserialize)]
struct MoveEntry {
    name: String,
}

/// Reference data loaded from a JSON document:
///
/// ```json
/// { "moves": { "thunderbolt": { "name": "Thunderbolt" } },
///   "learnsets": { "pikachu": { "thunderbolt": ["9M"] } } }
/// ```
///
/// A document without a `learnsets` table yields a dex that lacks the
/// learnability capability.
#[derive(Clone, Debug)]
pub struct JsonDex {
    moves: BTreeMap<String, String>,
    learnsets: Option<HashMap<String, Learnset>>,
}

impl JsonDex {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RuntimeError::DexLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| RuntimeError::DexParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let file: DexFile = serde_json::from_str(text)?;
        Ok(Self {
            moves: file
                .moves
                .into_iter()
                .map(|(id, entry)| (to_id(&id), entry.name))
                .collect(),
            learnsets: file.learnsets.map(|learnsets| {
                learnsets
                    .into_iter()
                    .map(|(species, learnset)| (to_id(&species), learnset))
                    .collect()
            }),
        })
    }

    pub fn has_learnsets(&self) -> bool {
        self.learnsets.is_some()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Wraps the dex for the controller; the learnability capability is
    /// only wired when the document carried one.
    pub fn into_manager(self) -> super::DexManager {
        let has_learnsets = self.has_learnsets();
        let dex = std::sync::Arc::new(self);
        if has_learnsets {
            super::DexManager::from_shared(dex)
        } else {
            super::DexManager::new(dex, None)
        }
    }
}

impl MoveOracle for JsonDex {
    fn move_name(&self, id: &str) -> Option<String> {
        self.moves.get(&to_id(id)).cloned()
    }

    fn move_ids(&self) -> Vec<String> {
        self.moves.keys().cloned().collect()
    }
}

#[async_trait]
impl LearnsetOracle for JsonDex {
    async fn learnable(&self, species_id: &str) -> std::result::Result<Option<Learnset>, OracleError> {
        let learnsets = self
            .learnsets
            .as_ref()
            .ok_or(OracleError::LearnsetsNotAvailable)?;
        Ok(learnsets.get(species_id).cloned())
    }
}
