//! LMDB ledger integrity checks.
//!
//! Run on startup to detect corruption early, before any invocation is
//! served.

use std::path::Path;

use heed::types::Bytes;

use crate::environment::NAMESPACES;
use crate::{LmdbEnvironment, LmdbError, META_DB};

/// Summary of an integrity check run.
#[derive(Debug)]
pub struct IntegrityReport {
    pub databases_checked: u32,
    pub total_entries: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check ledger integrity on startup.
///
/// Opens each expected database, counts its entries and verifies every key
/// is valid UTF-8. Failures are recorded in the report rather than causing a
/// hard error.
pub fn check_integrity(env: &LmdbEnvironment) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport {
        databases_checked: 0,
        total_entries: 0,
        errors: Vec::new(),
    };

    let rtxn = env.env().read_txn()?;

    for db_name in std::iter::once(META_DB).chain(NAMESPACES.iter().copied()) {
        match env.env().open_database::<Bytes, Bytes>(&rtxn, Some(db_name)) {
            Ok(Some(db)) => {
                report.databases_checked += 1;
                let iter = match db.iter(&rtxn) {
                    Ok(iter) => iter,
                    Err(e) => {
                        report
                            .errors
                            .push(format!("failed to read database '{}': {}", db_name, e));
                        continue;
                    }
                };
                for entry in iter {
                    match entry {
                        Ok((key, _)) => {
                            report.total_entries += 1;
                            if db_name != META_DB && std::str::from_utf8(key).is_err() {
                                report
                                    .errors
                                    .push(format!("non UTF-8 key in database '{}'", db_name));
                            }
                        }
                        Err(e) => {
                            report
                                .errors
                                .push(format!("failed to read database '{}': {}", db_name, e));
                            break;
                        }
                    }
                }
            }
            Ok(None) => {
                report
                    .errors
                    .push(format!("database '{}' is missing", db_name));
            }
            Err(e) => {
                report
                    .errors
                    .push(format!("failed to open database '{}': {}", db_name, e));
            }
        }
    }

    Ok(report)
}

/// Check if the LMDB data directory looks valid before opening.
///
/// Returns `Ok(())` for a fresh (nonexistent) directory. Returns an error
/// if the directory exists but `data.mdb` is missing, which suggests
/// corruption or misconfiguration.
pub fn check_data_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    let data_file = path.join("data.mdb");
    if !data_file.exists() {
        return Err(format!(
            "LMDB directory exists but data.mdb is missing at {}",
            path.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use evote_store::{Ledger, LedgerState, LedgerTxn};

    #[test]
    fn check_data_dir_fresh_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = check_data_dir(&dir.path().join("not_created_yet"));
        assert!(result.is_ok());
    }

    #[test]
    fn check_data_dir_without_data_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_data_dir(dir.path()).is_err());
    }

    #[test]
    fn healthy_environment() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), 1 << 20).unwrap();
        let ledger = env.ledger(crate::BALLOTS_DB).unwrap();
        let mut txn = ledger.begin().unwrap();
        txn.put_state("InitElection", &[0x00]).unwrap();
        txn.put_state("b1", b"{}").unwrap();
        txn.commit().unwrap();

        let report = check_integrity(&env).unwrap();
        assert!(report.is_healthy(), "{:?}", report.errors);
        assert_eq!(report.databases_checked, 3);
        assert_eq!(report.total_entries, 2);
        assert!(check_data_dir(dir.path()).is_ok());
    }

    #[test]
    fn unhealthy_report() {
        let report = IntegrityReport {
            databases_checked: 3,
            total_entries: 100,
            errors: vec!["corruption detected".to_string()],
        };
        assert!(!report.is_healthy());
    }
}
