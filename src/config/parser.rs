use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Reads and validates a configuration file
///
/// # Errors
///
/// Returns an error if the file is unreadable, not UTF-8, or invalid
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let content = simdutf8::basic::from_utf8(&data)
        .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in config file: {e}"))?;

    parse_config_str(content)
}

/// Parses and validates configuration TOML
///
/// # Errors
///
/// Returns an error on malformed TOML or out-of-range values
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse TOML config")?;

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    if config.core.manifest.as_os_str().is_empty() {
        anyhow::bail!("Manifest file name cannot be empty");
    }

    if config.core.file_list.as_os_str().is_empty() {
        anyhow::bail!("File list name cannot be empty");
    }

    if config.performance.mmap_threshold == 0 {
        anyhow::bail!("mmap_threshold must be at least 1 byte");
    }

    config.rotation.validate()
}
