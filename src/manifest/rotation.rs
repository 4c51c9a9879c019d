//! Backup naming for manifests that are about to be replaced.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default backup name: `checksum.txt` becomes `checksum_<millis>.old`.
pub const DEFAULT_TEMPLATE: &str = "{stem}_{millis}.old";

/// How an existing manifest is preserved before a new one is written.
///
/// The template is rendered into a file name placed next to the manifest.
/// Supported placeholders:
///
/// - `{name}`: manifest file name (`checksum.txt`)
/// - `{stem}`: file name without extension (`checksum`)
/// - `{ext}`: extension without the dot (`txt`)
/// - `{millis}`: Unix epoch milliseconds at rotation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationPolicy {
    /// Keep the previous manifest instead of overwriting it
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Backup file name template
    #[serde(default = "default_template")]
    pub template: String,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl RotationPolicy {
    /// Policy that overwrites the manifest without keeping a backup.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Checks that the template renders to a plain file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is empty, contains a path separator,
    /// or lacks `{millis}` while rotation is enabled.
    pub fn validate(&self) -> Result<()> {
        if self.template.trim().is_empty() {
            bail!("Rotation template cannot be empty");
        }
        if self.template.contains('/') || self.template.contains('\\') {
            bail!(
                "Rotation template must be a file name, not a path: {}",
                self.template
            );
        }
        if self.enabled && !self.template.contains("{millis}") {
            bail!(
                "Rotation template must contain {{millis}} so backups do not collide: {}",
                self.template
            );
        }
        Ok(())
    }

    /// Renders the backup path for `manifest` at time `millis`.
    #[must_use]
    pub fn backup_path(&self, manifest: &Path, millis: i64) -> PathBuf {
        let name = manifest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = manifest
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = manifest
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        let file_name = self
            .template
            .replace("{name}", &name)
            .replace("{stem}", &stem)
            .replace("{ext}", &ext)
            .replace("{millis}", &millis.to_string());

        manifest.with_file_name(file_name)
    }

    /// Moves an existing manifest out of the way.
    ///
    /// Returns the backup path, or `None` when there was nothing to rotate.
    /// The rename itself is the existence check, so a manifest that vanishes
    /// between runs is not an error. If the rendered name is already taken a
    /// numeric suffix is appended rather than replacing the older backup.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails for any reason other than the
    /// manifest being absent.
    pub fn rotate(&self, manifest: &Path) -> Result<Option<PathBuf>> {
        if !self.enabled {
            return Ok(None);
        }

        let millis = chrono::Utc::now().timestamp_millis();
        let base = self.backup_path(manifest, millis);
        let backup = first_free_name(&base);

        match std::fs::rename(manifest, &backup) {
            Ok(()) => {
                info!(from = %manifest.display(), to = %backup.display(), "rotated manifest");
                Ok(Some(backup))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context(format!(
                "Failed to rotate manifest {} to {}",
                manifest.display(),
                backup.display()
            ))),
        }
    }
}

fn first_free_name(base: &Path) -> PathBuf {
    if !base.exists() {
        return base.to_path_buf();
    }
    let mut n = 1u32;
    loop {
        let mut candidate = base.as_os_str().to_owned();
        candidate.push(format!(".{n}"));
        let candidate = PathBuf::from(candidate);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

const fn default_enabled() -> bool {
    true
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}
