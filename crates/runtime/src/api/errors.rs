//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and reference data
//! so clients can bubble them up with consistent context.
use std::path::PathBuf;

use battle_core::{BattleId, ErrorSeverity, OracleError, SyncFault};
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("sync request carries no battle id")]
    MissingBattleId,

    #[error("no battle state registered for '{battle_id}'")]
    UnknownBattle { battle_id: BattleId },

    #[error("runtime requires a dex manager")]
    MissingDex,

    #[error("sync worker command channel closed")]
    CommandChannelClosed,

    #[error("sync worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("sync worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("failed to read reference data from {path}")]
    DexLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reference data from {path}")]
    DexParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SyncFault for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::MissingBattleId
            | RuntimeError::UnknownBattle { .. }
            | RuntimeError::MissingDex
            | RuntimeError::DexLoad { .. }
            | RuntimeError::DexParse { .. } => ErrorSeverity::Contract,
            RuntimeError::Oracle(error) => error.severity(),
            RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_)
            | RuntimeError::Repository(_) => ErrorSeverity::Abort,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::MissingBattleId => "SYNC_MISSING_BATTLE_ID",
            RuntimeError::UnknownBattle { .. } => "SYNC_UNKNOWN_BATTLE",
            RuntimeError::MissingDex => "SYNC_MISSING_DEX",
            RuntimeError::CommandChannelClosed => "SYNC_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "SYNC_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "SYNC_WORKER_JOIN",
            RuntimeError::Repository(_) => "SYNC_REPOSITORY",
            RuntimeError::Oracle(error) => error.error_code(),
            RuntimeError::DexLoad { .. } => "SYNC_DEX_LOAD",
            RuntimeError::DexParse { .. } => "SYNC_DEX_PARSE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_errors_are_not_recoverable() {
        let missing = RuntimeError::Oracle(OracleError::LearnsetsNotAvailable);
        assert_eq!(missing.severity(), ErrorSeverity::Contract);
        assert_eq!(missing.error_code(), "ORACLE_LEARNSETS_NOT_AVAILABLE");

        let unknown = RuntimeError::UnknownBattle {
            battle_id: BattleId::new("b9"),
        };
        assert!(!unknown.severity().is_recoverable());
        assert_eq!(unknown.to_string(), "no battle state registered for 'b9'");
    }
}
