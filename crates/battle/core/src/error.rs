//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (e.g., [`crate::CodecError`], [`crate::OracleError`])
//! are defined next to the code that raises them. They share the
//! [`SyncFault`] trait so callers can decide between aborting a request and
//! continuing with reduced information.

/// How a failure affects the synchronization request that observed it.
///
/// - **Contract**: the caller broke a precondition; the request is aborted
///   and nothing is committed.
/// - **Degradation**: information is missing; the request continues and the
///   affected sub-result keeps its prior value.
/// - **Abort**: a sub-step could not produce a valid value; the whole working
///   copy is discarded and the committed snapshot stays as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Contract,
    Degradation,
    Abort,
}

impl ErrorSeverity {
    /// Returns a human-readable label for this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Degradation => "degradation",
            Self::Abort => "abort",
        }
    }

    /// Returns true if the request may proceed with partial data.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Degradation)
    }
}

/// Shared classification for errors raised while synchronizing battles.
pub trait SyncFault: core::fmt::Display {
    fn severity(&self) -> ErrorSeverity;

    /// Stable machine-readable code, e.g. `"ORACLE_LEARNSETS_NOT_AVAILABLE"`.
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_degradation_is_recoverable() {
        assert!(ErrorSeverity::Degradation.is_recoverable());
        assert!(!ErrorSeverity::Contract.is_recoverable());
        assert!(!ErrorSeverity::Abort.is_recoverable());
        assert_eq!(ErrorSeverity::Abort.as_str(), "abort");
    }
}
