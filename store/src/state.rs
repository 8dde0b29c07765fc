//! Ledger state traits.

use crate::StoreError;

/// Key-value access scoped to one transaction.
///
/// Keys are UTF-8 strings ordered lexicographically by their bytes. Values
/// are opaque.
pub trait LedgerState {
    /// Read the value at `key`, or `None` if the key is absent.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` at `key`, replacing any previous value.
    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// All pairs with `start <= key < end`, in key order.
    ///
    /// An empty `start` scans from the first key; an empty `end` scans
    /// through the last key.
    fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, StoreError>;

    /// Whether a value exists at `key`.
    fn has_state(&self, key: &str) -> Result<bool, StoreError> {
        self.get_state(key).map(|v| v.is_some())
    }
}

/// A writable, atomic unit of work.
///
/// Dropping a transaction without calling [`LedgerTxn::commit`] discards
/// every write made through it.
pub trait LedgerTxn: LedgerState {
    fn commit(self) -> Result<(), StoreError>;
}

/// A ledger that hands out serializable transactions.
pub trait Ledger {
    type Txn<'a>: LedgerTxn
    where
        Self: 'a;

    /// Begin a transaction. Reads and writes through it are isolated from
    /// every other transaction until it commits.
    fn begin(&self) -> Result<Self::Txn<'_>, StoreError>;
}

/// Reject keys the ledger cannot store.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey("key must not be empty".to_string()));
    }
    Ok(())
}
