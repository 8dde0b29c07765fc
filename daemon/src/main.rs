//! evote daemon: hosts the Ballot Registry and the Voter Log over an LMDB
//! ledger and runs operator commands against them.

mod commands;
mod config;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use evote_utils::LogFormat;

use crate::commands::App;
use crate::config::{DaemonConfig, Overrides};

#[derive(Parser)]
#[command(
    name = "evote-daemon",
    about = "Ballot Registry and Voter Log over an LMDB ledger"
)]
struct Cli {
    /// Data directory for ledger storage.
    #[arg(long, env = "EVOTE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// LMDB map size in MiB.
    #[arg(long, env = "EVOTE_MAP_SIZE_MB")]
    map_size_mb: Option<usize>,

    /// Log format: "human" or "json".
    #[arg(long, env = "EVOTE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "EVOTE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "EVOTE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run one operation against one application.
    Invoke {
        app: App,
        /// Operation name, e.g. "vote" or "getByVoterId".
        function: String,
        /// Positional operation arguments.
        #[arg(allow_hyphen_values = true, num_args = 0..)]
        args: Vec<String>,
    },
    /// Print the election phase of both applications.
    Status,
    /// Start the election in both applications.
    OpenElection,
    /// End the election in both applications.
    CloseElection,
    /// Check the data directory and ledger integrity.
    Check,
    /// Print ballot counts per candidate as JSON.
    Tally,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)?,
        None => DaemonConfig::default(),
    };
    let config = base.with_overrides(Overrides {
        data_dir: cli.data_dir,
        map_size_mb: cli.map_size_mb,
        log_format: cli.log_format,
        log_level: cli.log_level,
    })?;

    evote_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    let map_size = config.map_size_bytes();
    let mut stdout = std::io::stdout().lock();

    let ok = match cli.command {
        Command::Invoke {
            app,
            function,
            args,
        } => {
            let env = commands::open_ledger(&config.data_dir, map_size)?;
            match commands::invoke_app(&env, app, &function, &args)? {
                Ok(payload) => {
                    stdout.write_all(&payload)?;
                    if !payload.is_empty() {
                        stdout.write_all(b"\n")?;
                    }
                    true
                }
                Err(e) => {
                    eprintln!("{e}");
                    false
                }
            }
        }
        Command::Status => {
            let env = commands::open_ledger(&config.data_dir, map_size)?;
            commands::status(&env, &mut stdout)?;
            true
        }
        Command::OpenElection => {
            let env = commands::open_ledger(&config.data_dir, map_size)?;
            commands::transition_all(&env, "initElection", &mut stdout)?
        }
        Command::CloseElection => {
            let env = commands::open_ledger(&config.data_dir, map_size)?;
            commands::transition_all(&env, "endElection", &mut stdout)?
        }
        Command::Check => commands::check(&config.data_dir, map_size, &mut stdout)?,
        Command::Tally => {
            let env = commands::open_ledger(&config.data_dir, map_size)?;
            commands::tally(&env, &mut stdout)?;
            true
        }
    };
    stdout.flush()?;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
