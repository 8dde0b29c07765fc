//! Ballot records.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// A recorded vote, stored under its own `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ballot {
    /// Caller-chosen ballot identifier; also the ledger key.
    pub id: String,
    /// When the vote was cast.
    #[serde(rename = "dateTime", alias = "timestamp")]
    pub timestamp: Timestamp,
    /// The chosen candidate.
    pub candidate_number: i64,
}

impl Ballot {
    pub fn new(id: impl Into<String>, candidate_number: i64, timestamp: Timestamp) -> Self {
        Self {
            id: id.into(),
            timestamp,
            candidate_number,
        }
    }

    /// Ledger key this ballot is stored under.
    pub fn key(&self) -> &str {
        &self.id
    }
}
