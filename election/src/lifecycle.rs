//! Election lifecycle: the single source of truth for the current phase.
//!
//! The phase is never cached: every call re-reads the two control keys from
//! the ledger. Transitions are check-then-write sequences and rely on the
//! enclosing ledger transaction being serializable.

use evote_store::{LedgerState, StoreError};
use evote_types::{ElectionPhase, CONTROL_SENTINEL, END_ELECTION_KEY, INIT_ELECTION_KEY};

use crate::ContractError;

/// Derive the phase from the control keys.
///
/// `EndElection` is only consulted once `InitElection` is present.
pub fn current_phase<S>(state: &S) -> Result<ElectionPhase, StoreError>
where
    S: LedgerState + ?Sized,
{
    if !state.has_state(INIT_ELECTION_KEY)? {
        return Ok(ElectionPhase::NotStarted);
    }
    let ended = state.has_state(END_ELECTION_KEY)?;
    Ok(ElectionPhase::from_markers(true, ended))
}

/// Like [`current_phase`], but reports a failed read as
/// [`ElectionPhase::Error`] instead of failing.
pub fn check_status<S>(state: &S) -> ElectionPhase
where
    S: LedgerState + ?Sized,
{
    match current_phase(state) {
        Ok(phase) => phase,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read election phase");
            ElectionPhase::Error
        }
    }
}

/// `NOT_STARTED -> STARTED`.
pub fn init_election<S>(state: &mut S) -> Result<(), ContractError>
where
    S: LedgerState + ?Sized,
{
    if state.has_state(INIT_ELECTION_KEY)? {
        return Err(ContractError::AlreadyStarted);
    }
    state.put_state(INIT_ELECTION_KEY, CONTROL_SENTINEL)?;
    tracing::info!("election started");
    Ok(())
}

/// `STARTED -> ENDED`. Fails from any other phase.
pub fn end_election<S>(state: &mut S) -> Result<(), ContractError>
where
    S: LedgerState + ?Sized,
{
    match current_phase(state)? {
        ElectionPhase::Started => {}
        ElectionPhase::NotStarted => return Err(ContractError::NotStarted),
        ElectionPhase::Ended => return Err(ContractError::AlreadyEnded),
        ElectionPhase::Error => return Err(ContractError::ElectionNotOpen(ElectionPhase::Error)),
    }
    state.put_state(END_ELECTION_KEY, CONTROL_SENTINEL)?;
    tracing::info!("election ended");
    Ok(())
}

/// Fail with [`ContractError::ElectionNotOpen`] unless the phase is `STARTED`.
pub(crate) fn require_open<S>(state: &S) -> Result<(), ContractError>
where
    S: LedgerState + ?Sized,
{
    let phase = current_phase(state)?;
    if !phase.is_open() {
        return Err(ContractError::ElectionNotOpen(phase));
    }
    Ok(())
}
