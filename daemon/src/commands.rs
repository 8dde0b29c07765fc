//! Daemon subcommands, run against an opened LMDB environment.
//!
//! Output goes to the supplied writer so the commands can be driven from
//! tests; `main` passes stdout.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use evote_election::{check_status, invoke, BallotRegistry, Contract, ContractError, VoterLog};
use evote_store::Ledger;
use evote_store_lmdb::{
    check_data_dir, check_integrity, LmdbEnvironment, Migrator, BALLOTS_DB, VOTER_LOG_DB,
};
use evote_types::ElectionPhase;

/// The two applications hosted by the daemon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum App {
    Ballots,
    VoterLog,
}

impl App {
    pub const ALL: [App; 2] = [App::Ballots, App::VoterLog];

    /// LMDB database holding this application's state.
    pub fn namespace(self) -> &'static str {
        match self {
            App::Ballots => BALLOTS_DB,
            App::VoterLog => VOTER_LOG_DB,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            App::Ballots => BallotRegistry::NAME,
            App::VoterLog => VoterLog::NAME,
        }
    }
}

/// Open the ledger for serving invocations: directory sanity check, open,
/// then bring the schema up to date.
pub fn open_ledger(data_dir: &Path, map_size: usize) -> anyhow::Result<LmdbEnvironment> {
    check_data_dir(data_dir).map_err(anyhow::Error::msg)?;
    let env = LmdbEnvironment::open(data_dir, map_size)
        .with_context(|| format!("opening ledger at {}", data_dir.display()))?;
    Migrator::run(&env).context("migrating ledger schema")?;
    Ok(env)
}

/// Run one invocation. The outer error is an infrastructure failure; the
/// inner one is the application's rejection of the call.
pub fn invoke_app(
    env: &LmdbEnvironment,
    app: App,
    function: &str,
    args: &[String],
) -> anyhow::Result<Result<Vec<u8>, ContractError>> {
    let ledger = env.ledger(app.namespace())?;
    Ok(match app {
        App::Ballots => invoke(&ledger, &BallotRegistry, function, args),
        App::VoterLog => invoke(&ledger, &VoterLog, function, args),
    })
}

pub fn phase_of(env: &LmdbEnvironment, app: App) -> anyhow::Result<ElectionPhase> {
    let ledger = env.ledger(app.namespace())?;
    let txn = ledger.begin()?;
    Ok(check_status(&txn))
}

pub fn status(env: &LmdbEnvironment, out: &mut impl Write) -> anyhow::Result<()> {
    for app in App::ALL {
        writeln!(out, "{}: {}", app.name(), phase_of(env, app)?)?;
    }
    Ok(())
}

/// Apply one lifecycle operation to both applications. Each application is
/// its own transaction; a failure in one does not undo the other.
///
/// Returns `true` if both succeeded.
pub fn transition_all(
    env: &LmdbEnvironment,
    function: &str,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let mut all_ok = true;
    for app in App::ALL {
        match invoke_app(env, app, function, &[])? {
            Ok(_) => writeln!(out, "{}: {function} ok", app.name())?,
            Err(e) => {
                all_ok = false;
                writeln!(out, "{}: {function} failed: {e}", app.name())?;
            }
        }
    }
    Ok(all_ok)
}

/// Ballot counts per candidate, written as a JSON object keyed by
/// candidate number.
pub fn tally(env: &LmdbEnvironment, out: &mut impl Write) -> anyhow::Result<()> {
    let ledger = env.ledger(App::Ballots.namespace())?;
    let txn = ledger.begin()?;
    let counts = BallotRegistry.tally(&txn)?;
    serde_json::to_writer(&mut *out, &counts)?;
    writeln!(out)?;
    Ok(())
}

/// Data-directory and integrity checks. Returns `true` if healthy.
///
/// A missing directory is reported, never created.
pub fn check(data_dir: &Path, map_size: usize, out: &mut impl Write) -> anyhow::Result<bool> {
    if !data_dir.exists() {
        writeln!(out, "no ledger at {}", data_dir.display())?;
        return Ok(false);
    }
    if let Err(msg) = check_data_dir(data_dir) {
        writeln!(out, "data dir: {msg}")?;
        return Ok(false);
    }
    let env = LmdbEnvironment::open(data_dir, map_size)
        .with_context(|| format!("opening ledger at {}", data_dir.display()))?;
    let report = check_integrity(&env)?;
    writeln!(
        out,
        "schema version {}, databases checked: {}, entries: {}",
        env.schema_version()?,
        report.databases_checked,
        report.total_entries
    )?;
    for error in &report.errors {
        writeln!(out, "error: {error}")?;
    }
    Ok(report.is_healthy())
}
