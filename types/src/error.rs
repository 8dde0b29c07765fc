//! Errors raised while building typed values from raw input.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid RFC3339 timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("unknown election phase: {0}")]
    UnknownPhase(String),
}
