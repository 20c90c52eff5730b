//! Oracle access errors.

use crate::error::{ErrorSeverity, SyncFault};

/// Errors that occur when accessing reference data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// The reference data bundle carries no learnability lookup.
    #[error("learnset oracle not available")]
    LearnsetsNotAvailable,

    /// A learnability lookup rejected.
    #[error("learnset lookup for '{species}' failed: {reason}")]
    LookupFailed { species: String, reason: String },
}

impl SyncFault for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Without the lookup no combatant can be enriched
            OracleError::LearnsetsNotAvailable => ErrorSeverity::Contract,
            OracleError::LookupFailed { .. } => ErrorSeverity::Degradation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::LearnsetsNotAvailable => "ORACLE_LEARNSETS_NOT_AVAILABLE",
            OracleError::LookupFailed { .. } => "ORACLE_LOOKUP_FAILED",
        }
    }
}
