//! Voter Log: records who voted and enforces one vote per voter.

use evote_store::LedgerState;
use evote_types::VoterLogEntry;

use crate::lifecycle::{end_election, init_election, require_open};
use crate::operation::VoterLogOperation;
use crate::scan::{decode_entries, ControlKeys};
use crate::{Contract, ContractError};

pub struct VoterLog;

impl VoterLog {
    /// Record that `entry.voter_id` voted. Returns the voter id.
    ///
    /// Fails with [`ContractError::AlreadyVoted`] if any record already
    /// exists at that key.
    pub fn register<S>(&self, state: &mut S, entry: &VoterLogEntry) -> Result<Vec<u8>, ContractError>
    where
        S: LedgerState + ?Sized,
    {
        let bytes = serde_json::to_vec(entry)?;
        require_open(state)?;

        if state.has_state(entry.key())? {
            return Err(ContractError::AlreadyVoted(entry.voter_id.clone()));
        }
        state.put_state(entry.key(), &bytes)?;
        tracing::info!(voter = %entry.voter_id, "voter registered");
        Ok(entry.voter_id.clone().into_bytes())
    }

    /// The stored entry bytes at `voter_id`, unchanged. Permitted in every phase.
    pub fn get_by_voter_id<S>(&self, state: &S, voter_id: &str) -> Result<Vec<u8>, ContractError>
    where
        S: LedgerState + ?Sized,
    {
        state
            .get_state(voter_id)?
            .ok_or_else(|| ContractError::NotFound {
                kind: "voter log entry",
                key: voter_id.to_string(),
            })
    }

    /// Every entry with `start <= voterId < end`, control keys excluded.
    pub fn get_by_range<S>(
        &self,
        state: &S,
        start: &str,
        end: &str,
    ) -> Result<Vec<VoterLogEntry>, ContractError>
    where
        S: LedgerState + ?Sized,
    {
        let entries = state.get_state_by_range(start, end)?;
        tracing::debug!(start, end, scanned = entries.len(), "reading voter log range");
        decode_entries(entries, ControlKeys::Skip)
    }
}

impl Contract for VoterLog {
    const NAME: &'static str = "voter_log";

    type Operation = VoterLogOperation;

    fn parse(&self, function: &str, args: &[String]) -> Result<VoterLogOperation, ContractError> {
        VoterLogOperation::parse(function, args)
    }

    fn execute<S>(&self, state: &mut S, op: VoterLogOperation) -> Result<Vec<u8>, ContractError>
    where
        S: LedgerState + ?Sized,
    {
        match op {
            VoterLogOperation::InitElection => init_election(state).map(|()| Vec::new()),
            VoterLogOperation::EndElection => end_election(state).map(|()| Vec::new()),
            VoterLogOperation::Register(entry) => self.register(state, &entry),
            VoterLogOperation::GetByVoterId { voter_id } => self.get_by_voter_id(state, &voter_id),
            VoterLogOperation::GetByRange { start, end } => {
                let entries = self.get_by_range(state, &start, &end)?;
                Ok(serde_json::to_vec(&entries)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke;
    use evote_nullables::NullLedger;
    use evote_types::ElectionPhase;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn register(ledger: &NullLedger, voter: &str, key: &str, ts: &str) -> Result<Vec<u8>, ContractError> {
        invoke(ledger, &VoterLog, "register", &args(&[voter, key, ts]))
    }

    fn open_election() -> NullLedger {
        let ledger = NullLedger::new();
        invoke(&ledger, &VoterLog, "initElection", &[]).unwrap();
        ledger
    }

    fn range(ledger: &NullLedger, start: &str, end: &str) -> Vec<VoterLogEntry> {
        let bytes = invoke(ledger, &VoterLog, "getByRange", &args(&[start, end])).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn register_then_lookup() {
        let ledger = open_election();
        let confirmation = register(&ledger, "v1", "k1", "2024-01-01T00:00:00Z").unwrap();
        assert_eq!(confirmation, b"v1");

        let bytes = invoke(&ledger, &VoterLog, "getByVoterId", &args(&["v1"])).unwrap();
        let entry: VoterLogEntry = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(entry.voter_id, "v1");
        assert_eq!(entry.confirmation_key, "k1");
    }

    #[test]
    fn second_registration_rejected() {
        let ledger = open_election();
        register(&ledger, "v1", "k1", "2024-01-01T00:00:00Z").unwrap();
        let err = register(&ledger, "v1", "k2", "2024-01-01T00:01:00Z").unwrap_err();
        assert!(matches!(err, ContractError::AlreadyVoted(ref v) if v == "v1"));

        let bytes = invoke(&ledger, &VoterLog, "getByVoterId", &args(&["v1"])).unwrap();
        let entry: VoterLogEntry = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(entry.confirmation_key, "k1");
    }

    #[test]
    fn register_rejected_outside_started() {
        let ledger = NullLedger::new();
        let err = register(&ledger, "v1", "k1", "2024-01-01T00:00:00Z").unwrap_err();
        assert!(matches!(err, ContractError::ElectionNotOpen(ElectionPhase::NotStarted)));

        invoke(&ledger, &VoterLog, "initElection", &[]).unwrap();
        invoke(&ledger, &VoterLog, "endElection", &[]).unwrap();
        let err = register(&ledger, "v1", "k1", "2024-01-01T00:00:00Z").unwrap_err();
        assert!(matches!(err, ContractError::ElectionNotOpen(ElectionPhase::Ended)));
        assert!(ledger.get("v1").is_none());
    }

    #[test]
    fn phase_is_checked_before_uniqueness() {
        let ledger = open_election();
        register(&ledger, "v1", "k1", "2024-01-01T00:00:00Z").unwrap();
        invoke(&ledger, &VoterLog, "endElection", &[]).unwrap();
        let err = register(&ledger, "v1", "k2", "2024-01-01T00:00:00Z").unwrap_err();
        assert!(matches!(err, ContractError::ElectionNotOpen(ElectionPhase::Ended)));
    }

    #[test]
    fn end_election_checks() {
        let ledger = NullLedger::new();
        let err = invoke(&ledger, &VoterLog, "endElection", &[]).unwrap_err();
        assert!(matches!(err, ContractError::NotStarted));
        invoke(&ledger, &VoterLog, "initElection", &[]).unwrap();
        invoke(&ledger, &VoterLog, "endElection", &[]).unwrap();
        let err = invoke(&ledger, &VoterLog, "endElection", &[]).unwrap_err();
        assert!(matches!(err, ContractError::AlreadyEnded));
    }

    #[test]
    fn lookup_missing_voter() {
        let ledger = open_election();
        let err = invoke(&ledger, &VoterLog, "getByVoterId", &args(&["ghost"])).unwrap_err();
        assert_eq!(err.to_string(), "voter log entry not found: ghost");
    }

    #[test]
    fn range_excludes_control_keys() {
        let ledger = open_election();
        register(&ledger, "v2", "k2", "2024-01-01T00:00:02Z").unwrap();
        register(&ledger, "v1", "k1", "2024-01-01T00:00:01Z").unwrap();
        invoke(&ledger, &VoterLog, "endElection", &[]).unwrap();

        let all = range(&ledger, "", "");
        let voters: Vec<&str> = all.iter().map(|e| e.voter_id.as_str()).collect();
        assert_eq!(voters, vec!["v1", "v2"]);

        let controls_only = range(&ledger, "A", "J");
        assert!(controls_only.is_empty());
    }

    #[test]
    fn empty_range_is_empty_array() {
        let ledger = NullLedger::new();
        let bytes = invoke(&ledger, &VoterLog, "getByRange", &args(&["a", "b"])).unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn malformed_entry_aborts_range() {
        let ledger = open_election();
        register(&ledger, "v1", "k1", "2024-01-01T00:00:01Z").unwrap();
        ledger.seed("v2", &[0xff, 0x00]);
        let err = invoke(&ledger, &VoterLog, "getByRange", &args(&["v", "w"])).unwrap_err();
        assert!(matches!(err, ContractError::MalformedRecord { ref key, .. } if key == "v2"));
    }

    #[test]
    fn confirmation_key_may_be_empty() {
        let ledger = open_election();
        register(&ledger, "v1", "", "2024-01-01T00:00:00Z").unwrap();
        assert_eq!(range(&ledger, "v", "w")[0].confirmation_key, "");
    }

    #[test]
    fn uniqueness_check_read_failure_is_io() {
        let ledger = open_election();
        ledger.fail_reads(true);
        let err = register(&ledger, "v1", "k1", "2024-01-01T00:00:00Z").unwrap_err();
        assert!(matches!(err, ContractError::Io(_)));
        ledger.fail_reads(false);
        assert!(ledger.get("v1").is_none());
    }
}
