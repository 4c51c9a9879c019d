//! Manifest codec: the persisted list of expected fingerprints.
//!
//! A manifest is UTF-8 text with one record per line:
//!
//! ```text
//! path<TAB>md5hex<TAB>sizeBytes
//! ```
//!
//! Lines are sorted by path. There is no header, and the writer emits no
//! trailing newline (one is tolerated on read).
//!
//! Writing never silently discards an older manifest: it is first renamed
//! according to a [`RotationPolicy`], and the new content is written to a
//! temporary file that atomically replaces the target.

pub mod rotation;

pub use rotation::RotationPolicy;

use crate::errors::{ManifestParseError, ParseFailure};
use crate::fingerprint::FingerprintRecord;
use crate::lock::ManifestLock;
use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Field separator within a manifest line
const SEPARATOR: char = '\t';

/// Reads and writes manifest files.
pub struct Manifest;

impl Manifest {
    /// Writes `records` to `path`, rotating any existing manifest first.
    ///
    /// Returns the backup path when an older manifest was rotated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock on the manifest cannot be acquired
    /// - The existing manifest cannot be renamed
    /// - The new manifest cannot be written
    pub fn write(
        path: &Path,
        records: &[FingerprintRecord],
        rotation: &RotationPolicy,
    ) -> Result<Option<PathBuf>> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;

        let content = render_manifest(records);

        let lock = ManifestLock::acquire(path)?;

        let mut tmp = NamedTempFile::new_in(&parent)
            .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
        tmp.write_all(content.as_bytes())
            .context("Failed to write manifest contents")?;
        tmp.as_file()
            .sync_all()
            .context("Failed to flush manifest contents")?;

        let backup = rotation.rotate(path)?;
        if !rotation.enabled && path.exists() {
            warn!(path = %path.display(), "rotation disabled, overwriting existing manifest");
        }

        tmp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write manifest {}", path.display()))?;
        // The manifest is already in place; an unlock failure is not a failed write.
        if let Err(e) = lock.release() {
            warn!(path = %path.display(), error = %e, "failed to release manifest lock");
        }

        debug!(path = %path.display(), records = records.len(), "manifest written");
        Ok(backup)
    }

    /// Reads the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is absent, unreadable, not UTF-8, or
    /// contains a malformed line.
    pub fn read(path: &Path) -> Result<Vec<FingerprintRecord>> {
        if !path.exists() {
            bail!(
                "Manifest not found: {}. Run 'driftcheck generate' first",
                path.display()
            );
        }

        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        let content = simdutf8::basic::from_utf8(&data)
            .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in manifest {}: {e}", path.display()))?;

        let records = parse_manifest(content)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))?;
        debug!(path = %path.display(), records = records.len(), "manifest loaded");
        Ok(records)
    }
}

/// Renders records as manifest text, sorted by path.
#[must_use]
pub fn render_manifest(records: &[FingerprintRecord]) -> String {
    let mut sorted: Vec<&FingerprintRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    sorted
        .iter()
        .map(|r| format!("{}{SEPARATOR}{}{SEPARATOR}{}", r.path, r.hash, r.size))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses manifest text into records in lexicographic line order.
///
/// # Errors
///
/// Returns [`ManifestParseError`] for the first line that does not hold a
/// path, a hash and a decimal size.
pub fn parse_manifest(content: &str) -> Result<Vec<FingerprintRecord>, ManifestParseError> {
    let mut lines: Vec<&str> = content.lines().filter(|l| !l.is_empty()).collect();
    lines.sort_unstable();

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| parse_line(i + 1, line))
        .collect()
}

/// Splits from the right so that tabs inside a path survive.
fn parse_line(line_number: usize, line: &str) -> Result<FingerprintRecord, ManifestParseError> {
    let fail = |reason| ManifestParseError {
        line_number,
        line: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.rsplitn(3, SEPARATOR).collect();
    let [size, hash, path] = fields.as_slice() else {
        return Err(fail(ParseFailure::MissingFields(fields.len())));
    };

    if path.is_empty() {
        return Err(fail(ParseFailure::EmptyField("path")));
    }
    if hash.is_empty() {
        return Err(fail(ParseFailure::EmptyField("hash")));
    }
    if size.is_empty() || !size.bytes().all(|b| b.is_ascii_digit()) {
        return Err(fail(ParseFailure::InvalidSize((*size).to_string())));
    }

    Ok(FingerprintRecord {
        path: (*path).to_string(),
        hash: (*hash).to_string(),
        size: (*size).to_string(),
    })
}
