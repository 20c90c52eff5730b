use crate::error::{ErrorSeverity, SyncFault};

/// Errors raised while hydrating a dehydrated preset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("pair '{0}' has no opcode separator")]
    MalformedPair(String),

    #[error("invalid value '{value}' for opcode '{opcode}'")]
    InvalidValue { opcode: &'static str, value: String },

    #[error("required opcode '{0}' is missing")]
    MissingField(&'static str),
}

impl SyncFault for CodecError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Contract
    }

    fn error_code(&self) -> &'static str {
        match self {
            CodecError::MalformedPair(_) => "CODEC_MALFORMED_PAIR",
            CodecError::InvalidValue { .. } => "CODEC_INVALID_VALUE",
            CodecError::MissingField(_) => "CODEC_MISSING_FIELD",
        }
    }
}
