#![warn(missing_docs)]
#![allow(clippy::arithmetic_side_effects)] // Counters over file lists cannot overflow

//! # driftcheck - content fingerprints for a declared set of files
//!
//! driftcheck records the MD5 hash and byte size of every file named in a
//! plain-text file list, stores them in a sorted tab-separated manifest, and
//! later reports drift: files that went missing, files that appeared, and
//! files whose content or size changed.
//!
//! ## Architecture
//!
//! - [`filelist`]: reads and normalizes the list of files to check
//! - [`fingerprint`]: hashes files into [`fingerprint::FingerprintRecord`]s
//! - [`manifest`]: reads, writes and rotates manifest files
//! - [`reconcile`]: pure comparison of a model set against a current set
//! - [`output`]: colored terminal output and the verification report
//! - [`commands`]: the `generate` and `verify` flows
//! - [`config`]: TOML configuration
//!
//! ## Example Usage
//!
//! ```no_run
//! use driftcheck::CheckContext;
//! use driftcheck::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = CheckContext::from_config(Config::default())?;
//!
//! driftcheck::commands::generate::execute(&ctx)?;
//! let outcome = driftcheck::commands::verify::execute(&ctx)?;
//! assert_eq!(outcome.error_count(), 0);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Generate, verify and config command implementations.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Typed errors carried inside `anyhow` chains.
pub mod errors;

/// File list loading.
pub mod filelist;

/// Per-file fingerprints and the engine that computes them.
pub mod fingerprint;

/// Advisory lock around manifest replacement.
pub mod lock;

/// Manifest serialization and rotation.
pub mod manifest;

/// Output formatting, progress display and reports.
pub mod output;

/// Comparison of recorded and current fingerprints.
pub mod reconcile;

/// Utility functions and helpers.
pub mod utils;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Current version of the driftcheck binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default directory holding the file list and manifest.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default file list name inside the data directory.
pub const DEFAULT_FILE_LIST: &str = "filesForCheck.txt";

/// Default manifest name inside the data directory.
pub const DEFAULT_MANIFEST: &str = "checksum.txt";

/// Directory name under the user's config directory.
pub const CONFIG_DIR_NAME: &str = "driftcheck";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "DRIFTCHECK_CONFIG_PATH";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DRIFTCHECK_LOG";

/// Settings shared by every driftcheck operation.
///
/// The context is built once at the entry point and passed down, so the
/// data paths an operation touches are always explicit.
///
/// # Examples
///
/// ```no_run
/// use driftcheck::CheckContext;
///
/// # fn main() -> anyhow::Result<()> {
/// // Load from --config, DRIFTCHECK_CONFIG_PATH or the user config dir
/// let ctx = CheckContext::load(None)?;
/// println!("{}", ctx.manifest_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CheckContext {
    /// Configuration file the settings came from, if any.
    pub config_path: Option<PathBuf>,

    /// Effective configuration.
    pub config: config::Config,
}

impl CheckContext {
    /// Loads configuration from `config_path`, falling back to
    /// `DRIFTCHECK_CONFIG_PATH` and then the per-user config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(|| utils::paths::default_config_path().ok());

        let config = match &config_path {
            Some(path) => {
                let path = utils::expand_tilde(path)?;
                let validator = config::validator::ConfigValidator::new();
                if let Err(e) = validator.validate_config_file(&path) {
                    output::warning(&format!("Warning: Configuration validation failed: {e}"));
                }
                config::Config::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?
            }
            None => config::Config::default(),
        };

        let mut context = Self::from_config(config)?;
        context.config_path = config_path;
        Ok(context)
    }

    /// Builds a context from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a `~` path cannot be expanded.
    pub fn from_config(mut config: config::Config) -> Result<Self> {
        config.core.data_dir = utils::expand_tilde(&config.core.data_dir)?;
        if let Some(base) = &config.core.base_dir {
            config.core.base_dir = Some(utils::expand_tilde(base)?);
        }

        Ok(Self {
            config_path: None,
            config,
        })
    }

    /// Path of the file list.
    #[must_use]
    pub fn file_list_path(&self) -> PathBuf {
        self.config.file_list_path()
    }

    /// Path of the manifest.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.config.manifest_path()
    }

    /// Fingerprint options for this context.
    #[must_use]
    pub fn fingerprint_options(
        &self,
        verbose: bool,
        halt_on_missing: bool,
    ) -> fingerprint::FingerprintOptions {
        fingerprint::FingerprintOptions {
            verbose,
            halt_on_missing,
            show_progress: true,
            mmap_threshold: self.config.performance.mmap_threshold,
            base_dir: self.config.core.base_dir.clone(),
        }
    }
}
