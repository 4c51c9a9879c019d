//! Fingerprint engine: hashes every existing file of a file list.
//!
//! Files are processed one at a time in list order. A path that does not
//! name a regular file is recorded as missing and skipped; any other I/O
//! failure aborts the run.

use super::FingerprintRecord;
use super::hash::{DEFAULT_MMAP_THRESHOLD, hash_file};
use crate::output::{self, report::ReportEmitter};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Title of the error block printed for missing files when halting on them.
pub const MISSING_TARGETS_TITLE: &str = "Files listed for checking but not found";

/// Knobs for a fingerprinting run.
#[derive(Debug, Clone)]
pub struct FingerprintOptions {
    /// Print one line per hashed file
    pub verbose: bool,
    /// Print missing files as an error block once hashing finishes
    pub halt_on_missing: bool,
    /// Show a TTY progress line (ignored when `verbose` is set)
    pub show_progress: bool,
    /// Files of at least this many bytes are memory-mapped
    pub mmap_threshold: u64,
    /// Directory that relative list entries are resolved against
    pub base_dir: Option<PathBuf>,
}

impl Default for FingerprintOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            halt_on_missing: false,
            show_progress: false,
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
            base_dir: None,
        }
    }
}

impl FingerprintOptions {
    fn resolve(&self, entry: &str) -> PathBuf {
        let path = Path::new(entry);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Output of [`compute_fingerprints`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintRun {
    /// One record per existing file, in input order
    pub records: Vec<FingerprintRecord>,
    /// Entries that did not name an existing file, in input order
    pub missing: Vec<String>,
}

/// Fingerprints each entry of `paths`.
///
/// Records keep the entry text exactly as listed, even when it was
/// resolved against [`FingerprintOptions::base_dir`] for reading.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read.
pub fn compute_fingerprints(
    paths: &[String],
    options: &FingerprintOptions,
) -> Result<FingerprintRun> {
    let mut run = FingerprintRun::default();
    let mut progress = (options.show_progress && !options.verbose)
        .then(|| output::start_progress("Hashing files", paths.len()));

    for entry in paths {
        let target = options.resolve(entry);
        let mut hashed = 0;

        if target.is_file() {
            let (hash, size) = hash_file(&target, options.mmap_threshold)
                .with_context(|| format!("Failed to fingerprint \"{entry}\""))?;
            debug!(path = %entry, %hash, size, "fingerprinted");

            if options.verbose {
                output::info(&format!(
                    "Generated checksums for the file \"{entry}\"\t{hash}\t{size}"
                ));
            }
            run.records.push(FingerprintRecord::new(entry.as_str(), hash, size));
            hashed = size;
        } else {
            debug!(path = %entry, "listed file not found");
            run.missing.push(entry.clone());
        }

        if let Some(progress) = progress.as_mut() {
            progress.advance(hashed);
        }
    }

    if let Some(progress) = progress {
        progress.finish();
    }

    if options.halt_on_missing && !run.missing.is_empty() {
        ReportEmitter::stdout().list_error(MISSING_TARGETS_TITLE, &run.missing)?;
    }

    Ok(run)
}
