use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Expands a leading `~` to the home directory
///
/// # Errors
///
/// Returns an error if the path starts with `~` and the home directory
/// cannot be determined
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        return Ok(path.to_path_buf());
    };

    if path_str == "~" {
        return dirs::home_dir().context("Could not find home directory");
    }
    if let Some(rest) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir().context("Could not find home directory")?;
        return Ok(home.join(rest));
    }
    Ok(path.to_path_buf())
}

/// Default location of the configuration file
///
/// # Errors
///
/// Returns an error if no per-user configuration directory exists
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not find configuration directory")?;
    Ok(base.join(crate::CONFIG_DIR_NAME).join(crate::CONFIG_FILE_NAME))
}
