//! LMDB ledger backend for the evote applications.
//!
//! Implements the ledger traits from `evote-store` using the `heed` LMDB
//! bindings. Each application namespace maps to one named LMDB database
//! within a single environment; every ledger transaction is one LMDB write
//! transaction.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod ledger;
pub mod meta;
pub mod migration;

pub use environment::{LmdbEnvironment, BALLOTS_DB, META_DB, VOTER_LOG_DB};
pub use error::LmdbError;
pub use integrity::{check_data_dir, check_integrity, IntegrityReport};
pub use ledger::{LmdbLedger, LmdbTxn};
pub use migration::{Migrator, CURRENT_SCHEMA_VERSION};
