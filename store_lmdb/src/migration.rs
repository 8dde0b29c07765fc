//! Database schema migration engine.
//!
//! Tracks a monotonically increasing schema version in the meta database and
//! runs sequential migration functions to bring an older ledger up to date.

use crate::{LmdbEnvironment, LmdbError};

/// The schema version that the current code expects.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Runs database migrations to bring the schema up to date.
pub struct Migrator;

impl Migrator {
    /// Check the stored schema version and run any needed migrations.
    ///
    /// - Version 0 means a fresh environment (no version stored yet).
    /// - If the stored version matches `CURRENT_SCHEMA_VERSION`, this is a no-op.
    /// - A stored version *higher* than supported means the ledger was written
    ///   by a newer build; it is refused.
    pub fn run(env: &LmdbEnvironment) -> Result<(), LmdbError> {
        let current = env.schema_version()?;

        if current == CURRENT_SCHEMA_VERSION {
            tracing::info!(version = current, "ledger schema is up to date");
            return Ok(());
        }

        if current > CURRENT_SCHEMA_VERSION {
            return Err(LmdbError::Schema(format!(
                "ledger schema version {} is newer than supported version {}",
                current, CURRENT_SCHEMA_VERSION
            )));
        }

        for version in current..CURRENT_SCHEMA_VERSION {
            tracing::info!(from = version, to = version + 1, "running migration");
            run_migration(version, version + 1)?;
        }

        env.set_schema_version(CURRENT_SCHEMA_VERSION)?;

        tracing::info!(version = CURRENT_SCHEMA_VERSION, "migration complete");
        Ok(())
    }
}

fn run_migration(from: u32, to: u32) -> Result<(), LmdbError> {
    match (from, to) {
        // Initial schema: one database per namespace, JSON values, sentinel
        // control keys. Nothing to migrate from a blank slate.
        (0, 1) => Ok(()),
        _ => Err(LmdbError::Schema(format!(
            "unknown migration: {} -> {}",
            from, to
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_migration_is_error() {
        let result = run_migration(99, 100);
        assert!(result.is_err());
    }

    #[test]
    fn initial_migration_succeeds() {
        let result = run_migration(0, 1);
        assert!(result.is_ok());
    }

    #[test]
    fn fresh_environment_is_stamped() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), 1 << 20).unwrap();
        Migrator::run(&env).unwrap();
        assert_eq!(env.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);
        Migrator::run(&env).unwrap();
    }

    #[test]
    fn newer_schema_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let env = LmdbEnvironment::open(dir.path(), 1 << 20).unwrap();
        env.set_schema_version(CURRENT_SCHEMA_VERSION + 1).unwrap();
        assert!(Migrator::run(&env).is_err());
    }
}
