//! `driftcheck generate`: fingerprint the file list and write the manifest.

use crate::CheckContext;
use crate::filelist::load_file_list;
use crate::fingerprint::compute_fingerprints;
use crate::manifest::Manifest;
use crate::output;
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    /// Manifest that was written
    pub manifest: PathBuf,
    /// Where the previous manifest was moved, if one existed
    pub backup: Option<PathBuf>,
    /// Number of records written
    pub records: usize,
    /// Listed entries that were not found and left out of the manifest
    pub missing: Vec<String>,
}

/// Execute generate command - record fingerprints for every listed file
///
/// Files that do not exist are left out of the manifest. They are only
/// reported when `generate.report_missing` is set.
///
/// # Errors
///
/// Returns an error if:
/// - The file list cannot be read
/// - A listed file exists but cannot be read
/// - The manifest cannot be rotated or written
pub fn execute(ctx: &CheckContext) -> Result<GenerateOutcome> {
    let file_list = ctx.file_list_path();
    let manifest = ctx.manifest_path();

    output::line("File checksum generation program.");
    output::line(&format!(
        "The list of files is read from \"{}\"\n",
        output::file_name(&file_list.display().to_string())
    ));

    let paths = load_file_list(&file_list)?;
    let options = ctx.fingerprint_options(
        ctx.config.generate.verbose,
        ctx.config.generate.report_missing,
    );
    let run = compute_fingerprints(&paths, &options)?;

    let backup = Manifest::write(&manifest, &run.records, &ctx.config.rotation)?;
    info!(
        manifest = %manifest.display(),
        records = run.records.len(),
        missing = run.missing.len(),
        "generation finished"
    );

    output::line(&format!(
        "\nThe file list checksums are calculated and written to the file \"{}\"",
        output::file_name(&manifest.display().to_string())
    ));
    if let Some(backup) = &backup {
        output::line(&format!(
            "Previous manifest saved as \"{}\"",
            output::file_name(&backup.display().to_string())
        ));
    }

    Ok(GenerateOutcome {
        manifest,
        backup,
        records: run.records.len(),
        missing: run.missing,
    })
}
