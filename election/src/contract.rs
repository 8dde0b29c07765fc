//! Dispatch entry point shared by both applications.

use evote_store::{Ledger, LedgerState, LedgerTxn};

use crate::ContractError;

/// One ledger application: a closed operation set and its handlers.
pub trait Contract {
    /// Application name, used in logs and by the daemon.
    const NAME: &'static str;

    type Operation;

    /// Validate `(function, args)` without touching the ledger.
    fn parse(&self, function: &str, args: &[String]) -> Result<Self::Operation, ContractError>;

    /// Run a validated operation against one transaction's view of the ledger.
    fn execute<S>(&self, state: &mut S, op: Self::Operation) -> Result<Vec<u8>, ContractError>
    where
        S: LedgerState + ?Sized;

    /// Instantiation hook. Neither application keeps any setup state.
    fn init(&self) -> Result<Vec<u8>, ContractError> {
        Ok(Vec::new())
    }
}

/// Run one invocation as a single atomic transaction.
///
/// The transaction commits only if the handler succeeds; on failure it is
/// dropped, so a rejected invocation never leaves a partial write behind.
pub fn invoke<L, C>(
    ledger: &L,
    contract: &C,
    function: &str,
    args: &[String],
) -> Result<Vec<u8>, ContractError>
where
    L: Ledger,
    C: Contract,
{
    let span = tracing::info_span!("invoke", app = C::NAME, function = %function);
    let _guard = span.enter();

    let op = contract.parse(function, args).inspect_err(|e| {
        tracing::warn!(error = %e, "invocation rejected");
    })?;

    let mut txn = ledger.begin()?;
    match contract.execute(&mut txn, op) {
        Ok(payload) => {
            txn.commit()?;
            tracing::debug!(payload_len = payload.len(), "invocation committed");
            Ok(payload)
        }
        Err(e) => {
            tracing::warn!(error = %e, "invocation rejected");
            Err(e)
        }
    }
}
