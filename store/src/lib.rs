//! Abstract ledger access for the evote applications.
//!
//! Every ledger backend (LMDB, in-memory for testing) implements these
//! traits. The election handlers depend only on [`LedgerState`]; the
//! dispatcher opens one [`LedgerTxn`] per invocation through [`Ledger`].

pub mod error;
pub mod range;
pub mod state;

pub use error::StoreError;
pub use range::KeyRange;
pub use state::{validate_key, Ledger, LedgerState, LedgerTxn};
