/// TOML parsing and value validation
pub mod parser;
/// Unknown-key detection
pub mod validator;

use crate::fingerprint::hash::DEFAULT_MMAP_THRESHOLD;
use crate::manifest::RotationPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Effective driftcheck settings, as read from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Data locations
    #[serde(default)]
    pub core: CoreConfig,

    /// Backup naming for replaced manifests
    #[serde(default)]
    pub rotation: RotationPolicy,

    /// Settings for `generate`
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Settings for `verify`
    #[serde(default)]
    pub verify: VerifyConfig,

    /// Hashing tuning
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// `[core]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoreConfig {
    /// Directory holding the file list and the manifest
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// File list, relative to `data_dir` unless absolute
    #[serde(default = "default_file_list")]
    pub file_list: PathBuf,
    /// Manifest, relative to `data_dir` unless absolute
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
    /// Directory that relative entries of the file list are resolved
    /// against; the working directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
}

/// `[generate]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Print one line per hashed file
    #[serde(default = "default_true")]
    pub verbose: bool,
    /// Print listed-but-missing files as an error block
    #[serde(default)]
    pub report_missing: bool,
}

/// `[verify]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VerifyConfig {
    /// Print one line per hashed file while fingerprinting the disk
    #[serde(default)]
    pub verbose: bool,
    /// Exit with status 2 when any discrepancy is found
    #[serde(default)]
    pub strict_exit: bool,
}

/// `[performance]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerformanceConfig {
    /// Files at least this large are hashed through a memory map
    #[serde(default = "default_mmap_threshold")]
    pub mmap_threshold: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_list: default_file_list(),
            manifest: default_manifest(),
            base_dir: None,
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            verbose: true,
            report_missing: false,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot read the configuration file
    /// - Configuration file contains invalid TOML or invalid values
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        parser::parse_config_file(path)
    }

    /// Serializes the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if TOML serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Absolute-or-relative path of the file list.
    #[must_use]
    pub fn file_list_path(&self) -> PathBuf {
        self.core.data_dir.join(&self.core.file_list)
    }

    /// Absolute-or-relative path of the manifest.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.core.data_dir.join(&self.core.manifest)
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return None;
        }

        match (parts[0], parts[1]) {
            ("core", "data_dir") => Some(self.core.data_dir.display().to_string()),
            ("core", "file_list") => Some(self.core.file_list.display().to_string()),
            ("core", "manifest") => Some(self.core.manifest.display().to_string()),
            ("core", "base_dir") => self
                .core
                .base_dir
                .as_ref()
                .map(|p| p.display().to_string()),
            ("rotation", "enabled") => Some(self.rotation.enabled.to_string()),
            ("rotation", "template") => Some(self.rotation.template.clone()),
            ("generate", "verbose") => Some(self.generate.verbose.to_string()),
            ("generate", "report_missing") => Some(self.generate.report_missing.to_string()),
            ("verify", "verbose") => Some(self.verify.verbose.to_string()),
            ("verify", "strict_exit") => Some(self.verify.strict_exit.to_string()),
            ("performance", "mmap_threshold") => {
                Some(self.performance.mmap_threshold.to_string())
            }
            _ => None,
        }
    }
}

// Default functions for serde
fn default_data_dir() -> PathBuf {
    PathBuf::from(crate::DEFAULT_DATA_DIR)
}

fn default_file_list() -> PathBuf {
    PathBuf::from(crate::DEFAULT_FILE_LIST)
}

fn default_manifest() -> PathBuf {
    PathBuf::from(crate::DEFAULT_MANIFEST)
}

const fn default_true() -> bool {
    true
}

const fn default_mmap_threshold() -> u64 {
    DEFAULT_MMAP_THRESHOLD
}
