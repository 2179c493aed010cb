//! Command line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Magento Installer - Install Magento and its sample data
#[derive(Parser, Debug)]
#[command(name = "magento-installer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a SQL dump into individual statements
    Split {
        /// Path to the SQL dump
        #[arg(value_name = "DUMP")]
        dump: PathBuf,

        /// Statement delimiter
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Install Magento using a parameter file
    Install {
        /// Path to the install parameters YAML file
        #[arg(short, long, value_name = "PARAMS")]
        params: PathBuf,

        /// Magento root directory
        #[arg(long, value_name = "DIR")]
        magento_root: PathBuf,

        /// Sample data directory
        #[arg(long, value_name = "DIR")]
        sample_dir: Option<PathBuf>,

        /// Output path for the sample data statements
        #[arg(long, value_name = "OUTPUT")]
        statements_out: Option<PathBuf>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },
}

/// Statement output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Delimiter-terminated statements
    Text,
    /// JSON array of statements
    Json,
}
