use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eve-universe-db")]
#[command(version, about = "Collate the EVE Online SDE universe into a SQLite database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download (if needed) and ingest into SQLite
    Sync {
        /// Output SQLite database path
        output_db: PathBuf,

        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,

        /// Custom cache directory
        #[arg(short, long)]
        cache_dir: Option<PathBuf>,

        /// Entities per transaction during export
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Delete the existing database instead of updating it in place
        #[arg(short, long)]
        replace: bool,
    },

    /// Download and extract the latest SDE only
    Download {
        /// Custom cache directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,
    },

    /// Ingest an already-extracted SDE directory into SQLite
    Ingest {
        /// Directory containing the extracted SDE
        sde_dir: PathBuf,

        /// Output SQLite database path
        output_db: PathBuf,

        /// Entities per transaction during export
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Delete the existing database instead of updating it in place
        #[arg(short, long)]
        replace: bool,
    },

    /// List all output table names
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
