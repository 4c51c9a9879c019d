//! Loader for the list of files to fingerprint.
//!
//! The list is plain UTF-8 text with one path per line. Line endings may be
//! `\n`, `\r\n` or bare `\r`; blank lines and surrounding whitespace are
//! ignored. The result is sorted lexicographically so that hashing progress
//! and manifests come out in a stable order.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Reads and normalizes the file list at `path`.
///
/// Duplicates are kept; they collapse later when records are collected into
/// a [`crate::fingerprint::FingerprintSet`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn load_file_list(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read file list: {}", path.display()))?;

    let content = simdutf8::basic::from_utf8(&data)
        .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in file list {}: {e}", path.display()))?;

    let entries = parse_file_list(content);
    debug!(path = %path.display(), entries = entries.len(), "loaded file list");
    Ok(entries)
}

/// Splits file list text into trimmed, non-empty, sorted entries.
#[must_use]
pub fn parse_file_list(content: &str) -> Vec<String> {
    let mut entries: Vec<String> = content
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    entries.sort();
    entries
}
