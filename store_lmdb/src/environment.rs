//! LMDB environment setup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::ledger::LmdbLedger;
use crate::LmdbError;

/// Ballot Registry state.
pub const BALLOTS_DB: &str = "ballots";
/// Voter Log state.
pub const VOTER_LOG_DB: &str = "voter_log";
/// Schema version and other bookkeeping.
pub const META_DB: &str = "meta";

/// Databases created when an environment is opened.
pub(crate) const NAMESPACES: &[&str] = &[BALLOTS_DB, VOTER_LOG_DB];

const MAX_DBS: u32 = 8;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
    namespaces: HashMap<&'static str, Database<Bytes, Bytes>>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// The directory is created if missing. `map_size` is the maximum size
    /// of the memory map in bytes and bounds the database size.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process for this path
        // and the data file is not modified by anything outside LMDB.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let meta_db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some(META_DB))?;
        let mut namespaces = HashMap::new();
        for &name in NAMESPACES {
            let db = env.create_database::<Bytes, Bytes>(&mut wtxn, Some(name))?;
            namespaces.insert(name, db);
        }
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            meta_db,
            namespaces,
        })
    }

    /// The ledger for one application namespace.
    pub fn ledger(&self, namespace: &str) -> Result<LmdbLedger, LmdbError> {
        let db = self
            .namespaces
            .get(namespace)
            .copied()
            .ok_or_else(|| LmdbError::UnknownNamespace(namespace.to_string()))?;
        Ok(LmdbLedger::new(Arc::clone(&self.env), db))
    }

    pub fn env(&self) -> &Arc<Env> {
        &self.env
    }
}
