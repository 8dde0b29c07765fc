use evote_store::StoreError;
use evote_types::ElectionPhase;
use thiserror::Error;

/// Why an invocation failed. The `Display` text is the failure message
/// returned to the caller.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("wrong number of arguments: expected {expected} but got {got}")]
    InvalidArgumentCount { expected: usize, got: usize },

    #[error("invalid argument {name}: {reason}")]
    InvalidArgumentFormat { name: &'static str, reason: String },

    #[error("election on status {0}")]
    ElectionNotOpen(ElectionPhase),

    #[error("election hasn't been started yet")]
    NotStarted,

    #[error("election has already been started")]
    AlreadyStarted,

    #[error("election has already been ended")]
    AlreadyEnded,

    #[error("voter {0} has already voted")]
    AlreadyVoted(String),

    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("malformed record at key {key}: {reason}")]
    MalformedRecord { key: String, reason: String },

    #[error("ledger error: {0}")]
    Io(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid function: {0}")]
    InvalidFunction(String),
}

impl From<serde_json::Error> for ContractError {
    fn from(e: serde_json::Error) -> Self {
        ContractError::Serialization(e.to_string())
    }
}
