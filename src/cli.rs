use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Clone)]
#[command(name = "fbmg")]
#[command(about = "Firebird Metadata Manager")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Increase verbosity level (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Generate a sample configuration file
    Init,

    /// Build a fresh database from a scripts directory
    BuildDb {
        /// Directory the new database file is created in
        #[arg(long)]
        db_dir: Option<PathBuf>,

        /// Directory containing the DDL script files
        #[arg(long)]
        scripts_dir: Option<PathBuf>,
    },

    /// Export schema scripts from a live database
    ExportScripts {
        /// Database connection string
        #[arg(long)]
        connection_string: Option<String>,

        /// Directory the exported scripts are written to
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Output format (unknown formats fall back to "sql")
        #[arg(long)]
        format: Option<String>,
    },

    /// Reapply scripts onto an existing database without destroying it
    UpdateDb {
        /// Database connection string
        #[arg(long)]
        connection_string: Option<String>,

        /// Directory containing the DDL script files
        #[arg(long)]
        scripts_dir: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
