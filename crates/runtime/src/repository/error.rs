//! Error types raised by repository implementations.

use battle_core::BattleId;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("battle repository lock was poisoned")]
    LockPoisoned,

    #[error("battle '{0}' is already registered")]
    BattleExists(BattleId),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
