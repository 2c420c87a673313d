//! BranchBook CLI
//!
//! Command-line tools for BranchBook snapshot files and sync.
//!
//! # Commands
//!
//! - `status` - Print branch balances and record counts from a snapshot
//! - `sync` - Run one manual sync cycle against a remote blob host
//! - `version` - Show version information

mod commands;
mod store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// BranchBook command-line tools.
#[derive(Parser)]
#[command(name = "branchbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the local snapshot file
    #[arg(global = true, short, long)]
    snapshot: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print branch balances and record counts
    Status {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Run one manual sync cycle and save the adopted dataset
    Sync {
        /// Base URL of the remote blob host
        #[arg(long)]
        url: String,

        /// Shared sync key
        #[arg(long)]
        key: String,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Status { format } => {
            let snapshot = cli.snapshot.ok_or("Snapshot path required for status")?;
            commands::status::run(&snapshot, &format)?;
        }
        Commands::Sync { url, key } => {
            let snapshot = cli.snapshot.ok_or("Snapshot path required for sync")?;
            commands::sync::run(&snapshot, &url, &key).await?;
        }
        Commands::Version => {
            println!("BranchBook CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
