//! Ballot Registry: records votes and serves audits.
//!
//! Ballots are stored as JSON under their id. `vote` does not check for an
//! existing ballot: a second vote with the same id replaces the first.

use std::collections::BTreeMap;

use evote_store::LedgerState;
use evote_types::Ballot;

use crate::lifecycle::{end_election, init_election, require_open};
use crate::operation::RegistryOperation;
use crate::scan::{decode_entries, ControlKeys};
use crate::{Contract, ContractError};

pub struct BallotRegistry;

impl BallotRegistry {
    /// Record `ballot` at its id. Returns the id as confirmation.
    pub fn vote<S>(&self, state: &mut S, ballot: &Ballot) -> Result<Vec<u8>, ContractError>
    where
        S: LedgerState + ?Sized,
    {
        let bytes = serde_json::to_vec(ballot)?;
        require_open(state)?;

        if state.has_state(ballot.key())? {
            tracing::warn!(ballot = %ballot.id, "overwriting existing ballot");
        }
        state.put_state(ballot.key(), &bytes)?;
        tracing::info!(ballot = %ballot.id, "ballot recorded");
        Ok(ballot.id.clone().into_bytes())
    }

    /// The stored ballot bytes at `id`, unchanged. Permitted in every phase.
    pub fn audit_by_id<S>(&self, state: &S, id: &str) -> Result<Vec<u8>, ContractError>
    where
        S: LedgerState + ?Sized,
    {
        state
            .get_state(id)?
            .ok_or_else(|| ContractError::NotFound {
                kind: "ballot",
                key: id.to_string(),
            })
    }

    /// Every ballot with `start <= id < end`, in key order.
    ///
    /// Control keys inside the range are decoded like any other entry and
    /// therefore fail the audit.
    pub fn audit_by_range<S>(
        &self,
        state: &S,
        start: &str,
        end: &str,
    ) -> Result<Vec<Ballot>, ContractError>
    where
        S: LedgerState + ?Sized,
    {
        let entries = state.get_state_by_range(start, end)?;
        tracing::debug!(start, end, scanned = entries.len(), "auditing ballot range");
        decode_entries(entries, ControlKeys::Decode)
    }

    /// Ballot count per candidate number over the whole namespace.
    ///
    /// Control keys are skipped; any other undecodable value fails the tally.
    pub fn tally<S>(&self, state: &S) -> Result<BTreeMap<i64, u64>, ContractError>
    where
        S: LedgerState + ?Sized,
    {
        let entries = state.get_state_by_range("", "")?;
        let ballots: Vec<Ballot> = decode_entries(entries, ControlKeys::Skip)?;

        let mut counts = BTreeMap::new();
        for ballot in &ballots {
            *counts.entry(ballot.candidate_number).or_insert(0) += 1;
        }
        tracing::debug!(ballots = ballots.len(), candidates = counts.len(), "tallied ballots");
        Ok(counts)
    }
}

impl Contract for BallotRegistry {
    const NAME: &'static str = "ballots";

    type Operation = RegistryOperation;

    fn parse(&self, function: &str, args: &[String]) -> Result<RegistryOperation, ContractError> {
        RegistryOperation::parse(function, args)
    }

    fn execute<S>(&self, state: &mut S, op: RegistryOperation) -> Result<Vec<u8>, ContractError>
    where
        S: LedgerState + ?Sized,
    {
        match op {
            RegistryOperation::InitElection => init_election(state).map(|()| Vec::new()),
            RegistryOperation::EndElection => end_election(state).map(|()| Vec::new()),
            RegistryOperation::Vote(ballot) => self.vote(state, &ballot),
            RegistryOperation::AuditById { id } => self.audit_by_id(state, &id),
            RegistryOperation::AuditByRange { start, end } => {
                let ballots = self.audit_by_range(state, &start, &end)?;
                Ok(serde_json::to_vec(&ballots)?)
            }
        }
    }
}
