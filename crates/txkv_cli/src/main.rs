//! TxKV CLI
//!
//! Reads TxKV protocol commands, one per line, from stdin or a script file
//! and prints replies to stdout. Logs go to stderr.
//!
//! # Protocol
//!
//! - `SET key value`, `GET key`, `UNSET key`, `NUMEQUALTO value`
//! - `BEGIN`, `ROLLBACK`, `COMMIT`
//! - `END` stops reading

mod repl;

use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use txkv_core::{Config, Database, DatabaseStats};

/// In-memory key-value store with nested transactions.
#[derive(Parser)]
#[command(name = "txkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Maximum number of nested open transactions
    #[arg(short, long)]
    max_depth: Option<usize>,

    /// Print operation statistics to stderr on exit
    #[arg(long)]
    stats: bool,

    /// Statistics output format
    #[arg(long, value_enum, default_value_t = StatsFormat::Text)]
    stats_format: StatsFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatsFormat {
    Text,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Some(Commands::Version) = cli.command {
        println!("TxKV CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("TxKV Core v{}", txkv_core::VERSION);
        return Ok(());
    }

    let config = Config::new().max_transaction_depth(cli.max_depth);
    let mut db = Database::with_config(config);

    let input = repl::open_input(cli.script.as_deref())?;
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let summary = match repl::run(&mut db, input, &mut output) {
        Ok(summary) => summary,
        Err(err) => {
            warn!(error = %err, "input aborted");
            return Err(err.into());
        }
    };
    if !summary.ended {
        debug!(lines = summary.lines, "input exhausted before END");
    }

    if cli.stats {
        print_stats(db.stats(), cli.stats_format)?;
    }

    Ok(())
}

fn print_stats(stats: &DatabaseStats, format: StatsFormat) -> Result<(), serde_json::Error> {
    match format {
        StatsFormat::Text => eprintln!("{stats}"),
        StatsFormat::Json => eprintln!("{}", serde_json::to_string_pretty(stats)?),
    }
    Ok(())
}
