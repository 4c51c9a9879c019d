//! Command-line interface definitions for driftcheck.
//!
//! The CLI definitions are shared between the main binary and the xtask
//! crate for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes, so we
//! allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for driftcheck.
#[derive(Parser)]
#[command(
    name = "driftcheck",
    version = crate::VERSION,
    about = "Record file fingerprints and detect drift",
    long_about = "Computes MD5 fingerprints for a declared list of files, writes them to a \
                  manifest, and later reports missing, new and changed files"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file to use
    #[arg(short, long, global = true, env = crate::CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// Directory holding the file list and the manifest
    #[arg(short = 'd', long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// File list path (relative to the data directory unless absolute)
    #[arg(long, global = true)]
    pub file_list: Option<PathBuf>,

    /// Manifest path (relative to the data directory unless absolute)
    #[arg(short, long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Directory that relative file list entries are resolved against
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fingerprint every listed file and write a new manifest
    Generate {
        /// Print listed files that do not exist
        #[arg(long)]
        report_missing: bool,

        /// Overwrite the manifest instead of keeping a timestamped backup
        #[arg(long)]
        no_rotate: bool,
    },

    /// Compare the manifest against the files on disk
    Verify {
        /// Exit with status 2 when any discrepancy is found
        #[arg(long)]
        strict: bool,
    },

    /// Show effective configuration
    Config {
        /// Configuration key (e.g. core.manifest)
        key: Option<String>,

        /// Print the whole configuration as TOML
        #[arg(short, long)]
        list: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
