//! Reference-data adapters.
//!
//! The move catalog and learnability index are immutable at runtime. They
//! are bundled into a [`DexManager`] and injected into the controller
//! explicitly; no battle owns them.
mod json;
mod memory;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use battle_core::dex::base_species;
use battle_core::util::to_id;
use battle_core::{MoveOracle, OracleError};

pub use json::JsonDex;
pub use memory::InMemoryDex;

/// Move id to learn-method metadata. Only the key set is consumed.
pub type Learnset = BTreeMap<String, Vec<String>>;

/// Learnability index keyed by species id.
///
/// This is the one lookup that may suspend.
#[async_trait]
pub trait LearnsetOracle: Send + Sync {
    /// Learnset of `species_id`, or `None` when the index has no entry.
    async fn learnable(&self, species_id: &str) -> Result<Option<Learnset>, OracleError>;
}

/// Bundles the reference-data capabilities handed to the controller.
#[derive(Clone)]
pub struct DexManager {
    moves: Arc<dyn MoveOracle>,
    learnsets: Option<Arc<dyn LearnsetOracle>>,
}

impl DexManager {
    pub fn new(moves: Arc<dyn MoveOracle>, learnsets: Option<Arc<dyn LearnsetOracle>>) -> Self {
        Self { moves, learnsets }
    }

    /// Uses one value for both capabilities.
    pub fn from_shared<D>(dex: Arc<D>) -> Self
    where
        D: MoveOracle + LearnsetOracle + 'static,
    {
        Self {
            moves: dex.clone(),
            learnsets: Some(dex),
        }
    }

    pub fn moves(&self) -> &dyn MoveOracle {
        self.moves.as_ref()
    }

    /// The learnability lookup, required by every sync.
    pub fn learnsets(&self) -> Result<&dyn LearnsetOracle, OracleError> {
        self.learnsets
            .as_deref()
            .ok_or(OracleError::LearnsetsNotAvailable)
    }

    /// Learnset for a species forme, falling back to its base species when
    /// the forme itself has no entry (e.g. `"Charizard-Mega-X"`).
    pub async fn learnset_for(&self, species_forme: &str) -> Result<Learnset, OracleError> {
        let learnsets = self.learnsets()?;

        if let Some(learnset) = learnsets.learnable(&to_id(species_forme)).await? {
            return Ok(learnset);
        }

        let base = base_species(species_forme);
        if base != species_forme
            && let Some(learnset) = learnsets.learnable(&to_id(base)).await?
        {
            return Ok(learnset);
        }

        Ok(Learnset::new())
    }
}
