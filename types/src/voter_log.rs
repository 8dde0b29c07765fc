//! Voter participation records.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Proof that a voter took part, stored under `voter_id`.
///
/// At most one entry per voter may ever exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterLogEntry {
    pub voter_id: String,
    #[serde(rename = "dateTime", alias = "timestamp")]
    pub timestamp: Timestamp,
    /// Key handed back to the voter so they can later check their entry.
    pub confirmation_key: String,
}

impl VoterLogEntry {
    pub fn new(
        voter_id: impl Into<String>,
        confirmation_key: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            voter_id: voter_id.into(),
            timestamp,
            confirmation_key: confirmation_key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.voter_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_wire_field_names() {
        let entry = VoterLogEntry::new("v1", "k1", "2024-01-01T00:00:00Z".parse().unwrap());
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"voterId":"v1","dateTime":"2024-01-01T00:00:00Z","confirmationKey":"k1"}"#
        );
    }

    #[test]
    fn sentinel_byte_is_not_an_entry() {
        assert!(serde_json::from_slice::<VoterLogEntry>(&[0x00]).is_err());
    }
}
