//! LMDB implementation of the ledger traits.
//!
//! LMDB allows a single write transaction at a time, so every transaction
//! handed out here is serializable with respect to all others.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, RwTxn};

use evote_store::{validate_key, KeyRange, Ledger, LedgerState, LedgerTxn, StoreError};

use crate::LmdbError;

/// One application namespace inside an LMDB environment.
pub struct LmdbLedger {
    pub(crate) env: Arc<Env>,
    pub(crate) state_db: Database<Bytes, Bytes>,
}

impl LmdbLedger {
    pub(crate) fn new(env: Arc<Env>, state_db: Database<Bytes, Bytes>) -> Self {
        Self { env, state_db }
    }

    /// Number of keys stored in this namespace, control keys included.
    pub fn len(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let count = self.state_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|n| n == 0)
    }
}

impl Ledger for LmdbLedger {
    type Txn<'a> = LmdbTxn<'a>;

    fn begin(&self) -> Result<LmdbTxn<'_>, StoreError> {
        let txn = self.env.write_txn().map_err(LmdbError::from)?;
        Ok(LmdbTxn {
            txn,
            state_db: self.state_db,
        })
    }
}

/// A ledger transaction backed by one LMDB write transaction.
///
/// Dropping it without committing aborts the LMDB transaction.
pub struct LmdbTxn<'a> {
    txn: RwTxn<'a>,
    state_db: Database<Bytes, Bytes>,
}

fn decode_key(raw: &[u8]) -> Result<String, LmdbError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| LmdbError::Corruption(format!("non UTF-8 key: {e}")))
}

impl LedgerState for LmdbTxn<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let val = self
            .state_db
            .get(&self.txn, key.as_bytes())
            .map_err(LmdbError::from)?;
        Ok(val.map(<[u8]>::to_vec))
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        self.state_db
            .put(&mut self.txn, key.as_bytes(), value)
            .map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        let range = KeyRange::new(start, end);
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let bounds = range.bounds();
        let iter = self
            .state_db
            .range(&self.txn, &bounds)
            .map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (key, val) = entry.map_err(LmdbError::from)?;
            results.push((decode_key(key)?, val.to_vec()));
        }
        Ok(results)
    }
}

impl LedgerTxn for LmdbTxn<'_> {
    fn commit(self) -> Result<(), StoreError> {
        self.txn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
