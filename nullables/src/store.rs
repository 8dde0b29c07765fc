//! Nullable ledger: thread-safe in-memory storage for testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use evote_store::{validate_key, KeyRange, Ledger, LedgerState, LedgerTxn, StoreError};

/// An in-memory ledger for testing.
///
/// Transactions are serialized: `begin` blocks while another transaction is
/// open. Writes are staged in the transaction and applied on commit.
pub struct NullLedger {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
    writer: Mutex<()>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    commits: AtomicU64,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            writer: Mutex::new(()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            commits: AtomicU64::new(0),
        }
    }

    /// Make every subsequent read fail with a backend error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Write raw bytes outside any transaction (e.g. to plant a malformed record).
    pub fn seed(&self, key: &str, value: &[u8]) {
        self.entries().insert(key.to_string(), value.to_vec());
    }

    /// Committed value at `key`.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries().get(key).cloned()
    }

    /// All committed pairs in key order.
    pub fn snapshot(&self) -> Vec<(String, Vec<u8>)> {
        self.entries()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Number of transactions committed so far.
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected read failure".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected write failure".to_string()));
        }
        Ok(())
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for NullLedger {
    type Txn<'a> = NullTxn<'a>;

    fn begin(&self) -> Result<NullTxn<'_>, StoreError> {
        let guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(NullTxn {
            ledger: self,
            _writer: guard,
            staged: BTreeMap::new(),
        })
    }
}

/// A transaction against a [`NullLedger`].
pub struct NullTxn<'a> {
    ledger: &'a NullLedger,
    _writer: MutexGuard<'a, ()>,
    staged: BTreeMap<String, Vec<u8>>,
}

impl LedgerState for NullTxn<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.ledger.check_read()?;
        if let Some(value) = self.staged.get(key) {
            return Ok(Some(value.clone()));
        }
        Ok(self.ledger.get(key))
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        self.ledger.check_write()?;
        self.staged.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        self.ledger.check_read()?;
        let range = KeyRange::new(start, end);
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let mut merged: BTreeMap<String, Vec<u8>> = self
            .ledger
            .entries()
            .iter()
            .filter(|(k, _)| range.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (k, v) in self.staged.iter().filter(|(k, _)| range.contains(k)) {
            merged.insert(k.clone(), v.clone());
        }
        Ok(merged.into_iter().collect())
    }
}

impl LedgerTxn for NullTxn<'_> {
    fn commit(self) -> Result<(), StoreError> {
        let mut entries = self.ledger.entries();
        entries.extend(self.staged);
        self.ledger.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
