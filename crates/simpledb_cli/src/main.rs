//! SimpleDB CLI
//!
//! Reads protocol commands line by line and prints results.
//!
//! # Usage
//!
//! ```text
//! $ printf 'SET a 10\nGET a\nEND\n' | simpledb
//! 10
//! ```

mod report;
mod session;

use clap::{Parser, Subcommand};
use session::Session;
use simpledb_core::StoreConfig;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// In-memory key/value store with nested transactions.
#[derive(Parser)]
#[command(name = "simpledb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Read commands from this file instead of standard input
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print the welcome banner before reading commands
    #[arg(short, long)]
    banner: bool,

    /// Print session statistics to stderr on exit (text, json)
    #[arg(short, long)]
    stats: Option<String>,

    /// Keep zero entries in the value count index
    #[arg(long)]
    retain_zero_counts: bool,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries protocol output only
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Some(Commands::Version) = cli.command {
        println!("SimpleDB CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("SimpleDB Core v{}", simpledb_core::VERSION);
        return Ok(());
    }

    let config = StoreConfig::new().retain_zero_counts(cli.retain_zero_counts);
    let mut session = Session::new(config, io::stdout().lock());
    if cli.banner {
        session.print_banner()?;
    }

    let end = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("cannot open input {}: {e}", path.display()))?;
            session.run(BufReader::new(file))?
        }
        None => session.run(io::stdin().lock())?,
    };

    if let Some(format) = cli.stats {
        let report = report::SessionReport::new(&session, end);
        report::print(&report, &format, &mut io::stderr())?;
    }

    Ok(())
}
