//! Decoding of range-scan results.

use serde::de::DeserializeOwned;

use evote_types::is_control_key;

use crate::ContractError;

/// Whether control keys found in a scan are decoded like any other entry
/// or left out of the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ControlKeys {
    Decode,
    Skip,
}

/// Decode every scanned value as `T`, in scan order.
///
/// The first value that fails to decode aborts the whole scan.
pub(crate) fn decode_entries<T: DeserializeOwned>(
    entries: Vec<(String, Vec<u8>)>,
    control_keys: ControlKeys,
) -> Result<Vec<T>, ContractError> {
    let mut records = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        if control_keys == ControlKeys::Skip && is_control_key(&key) {
            continue;
        }
        let record = serde_json::from_slice(&value).map_err(|e| ContractError::MalformedRecord {
            key,
            reason: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evote_types::VoterLogEntry;

    fn entry(voter: &str) -> (String, Vec<u8>) {
        let record = VoterLogEntry::new(voter, "k", "2024-01-01T00:00:00Z".parse().unwrap());
        (voter.to_string(), serde_json::to_vec(&record).unwrap())
    }

    #[test]
    fn skips_control_keys_on_request() {
        let entries = vec![
            ("EndElection".to_string(), vec![0x00]),
            ("InitElection".to_string(), vec![0x00]),
            entry("v1"),
        ];
        let records: Vec<VoterLogEntry> = decode_entries(entries, ControlKeys::Skip).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].voter_id, "v1");
    }

    #[test]
    fn decodes_control_keys_otherwise() {
        let entries = vec![("InitElection".to_string(), vec![0x00]), entry("v1")];
        let err = decode_entries::<VoterLogEntry>(entries, ControlKeys::Decode).unwrap_err();
        assert!(matches!(err, ContractError::MalformedRecord { ref key, .. } if key == "InitElection"));
    }

    #[test]
    fn empty_scan_is_empty() {
        let records: Vec<VoterLogEntry> = decode_entries(Vec::new(), ControlKeys::Skip).unwrap();
        assert!(records.is_empty());
    }
}
