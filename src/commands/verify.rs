//! `driftcheck verify`: compare the manifest against the files on disk.

use crate::CheckContext;
use crate::filelist::load_file_list;
use crate::fingerprint::{FingerprintSet, compute_fingerprints};
use crate::manifest::Manifest;
use crate::output::{self, report::ReportEmitter};
use crate::reconcile::{Reconciliation, reconcile};
use anyhow::Result;
use tracing::info;

/// Fingerprints the current files and reconciles them with the manifest,
/// without printing a report.
///
/// The engine's own missing list is not used here: a listed file that is
/// absent shows up as "missing on disk" when the manifest knows it.
///
/// # Errors
///
/// Returns an error if the manifest or file list cannot be read, or a
/// listed file exists but cannot be read.
pub fn check(ctx: &CheckContext) -> Result<Reconciliation> {
    let model = FingerprintSet::from_records(Manifest::read(&ctx.manifest_path())?);

    let paths = load_file_list(&ctx.file_list_path())?;
    let options = ctx.fingerprint_options(ctx.config.verify.verbose, false);
    let run = compute_fingerprints(&paths, &options)?;
    let current = FingerprintSet::from_records(run.records);

    let result = reconcile(&model, &current);
    info!(
        model = model.len(),
        current = current.len(),
        errors = result.error_count(),
        "verification finished"
    );
    Ok(result)
}

/// Execute verify command - print every discrepancy and a summary line
///
/// # Errors
///
/// Returns an error if:
/// - The manifest is missing, unreadable or malformed
/// - The file list cannot be read
/// - A listed file exists but cannot be read
pub fn execute(ctx: &CheckContext) -> Result<Reconciliation> {
    output::line("File checksum verification program.\n");
    output::line(&format!(
        "The list of files is {}\n",
        output::file_name(&ctx.file_list_path().display().to_string())
    ));

    let result = check(ctx)?;

    let mut report = ReportEmitter::stdout();
    report.reconciliation(&result)?;
    report.summary(result.error_count())?;

    Ok(result)
}
