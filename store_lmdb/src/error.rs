use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown namespace: {0}")]
    UnknownNamespace(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted entry: {0}")]
    Corruption(String),

    #[error("schema error: {0}")]
    Schema(String),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<LmdbError> for evote_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::Corruption(msg) => evote_store::StoreError::Corruption(msg),
            LmdbError::Serialization(msg) => evote_store::StoreError::Serialization(msg),
            other => evote_store::StoreError::Backend(other.to_string()),
        }
    }
}
