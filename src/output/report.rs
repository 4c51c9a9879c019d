//! Rendering of verification results.
//!
//! [`ReportEmitter`] writes labeled error blocks and the closing summary to
//! any [`Write`] sink. The binary points it at stdout; tests collect the
//! output in a `Vec<u8>`.

use crate::reconcile::{Mismatch, Reconciliation};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, Stdout, Write};

/// Block title for paths recorded in the manifest but gone from disk
pub const MISSING_ON_DISK_TITLE: &str = "Files listed in the manifest but missing on disk";
/// Block title for paths on disk that the manifest does not know
pub const UNEXPECTED_ON_DISK_TITLE: &str = "Files present on disk but absent from the manifest";
/// Block title for paths whose hash or size changed
pub const MISMATCH_TITLE: &str = "Files whose properties differ from the manifest";

/// Summary line printed when nothing drifted
pub const SUCCESS_MESSAGE: &str =
    "Checksum verification completed successfully. No discrepancies found.";

/// Writes reconciliation reports.
pub struct ReportEmitter<W: Write> {
    out: W,
}

impl ReportEmitter<Stdout> {
    /// Emitter writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReportEmitter<W> {
    /// Emitter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recovers the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes a titled list of items followed by a blank line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the sink fails.
    pub fn list_error<S: AsRef<str>>(&mut self, title: &str, items: &[S]) -> Result<()> {
        writeln!(self.out, "{}", format!("{title}:").red().bold())?;
        for item in items {
            writeln!(self.out, "  - {}", item.as_ref())?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Writes one block per non-empty discrepancy category.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the sink fails.
    pub fn reconciliation(&mut self, result: &Reconciliation) -> Result<()> {
        if !result.missing_on_disk.is_empty() {
            self.list_error(MISSING_ON_DISK_TITLE, &result.missing_on_disk)?;
        }
        if !result.unexpected_on_disk.is_empty() {
            self.list_error(UNEXPECTED_ON_DISK_TITLE, &result.unexpected_on_disk)?;
        }
        if !result.mismatches.is_empty() {
            let lines: Vec<String> = result.mismatches.iter().map(format_mismatch).collect();
            self.list_error(MISMATCH_TITLE, &lines)?;
        }
        Ok(())
    }

    /// Writes the closing pass/fail line for `error_count` discrepancies.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the sink fails.
    pub fn summary(&mut self, error_count: usize) -> Result<()> {
        if error_count == 0 {
            writeln!(self.out, "{}", SUCCESS_MESSAGE.green())?;
        } else {
            writeln!(self.out, "{}", failure_message(error_count).red())?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Summary line for a run that found `error_count` discrepancies.
#[must_use]
pub fn failure_message(error_count: usize) -> String {
    format!("Verification completed. Number of discrepancies found: {error_count}")
}

/// `"path": checksum differs; size differs.`
#[must_use]
pub fn format_mismatch(mismatch: &Mismatch) -> String {
    let details: Vec<&str> = mismatch.kinds.iter().map(|k| k.message()).collect();
    format!("\"{}\": {}.", mismatch.path, details.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::MismatchKind;
    use rstest::rstest;

    fn render(f: impl FnOnce(&mut ReportEmitter<Vec<u8>>) -> Result<()>) -> String {
        colored::control::set_override(false);
        let mut emitter = ReportEmitter::new(Vec::new());
        f(&mut emitter).unwrap();
        String::from_utf8(emitter.into_inner()).unwrap()
    }

    #[rstest]
    #[case(vec![MismatchKind::Checksum], "\"a.txt\": checksum differs.")]
    #[case(vec![MismatchKind::Size], "\"a.txt\": size differs.")]
    #[case(
        vec![MismatchKind::Checksum, MismatchKind::Size],
        "\"a.txt\": checksum differs; size differs."
    )]
    fn test_format_mismatch(#[case] kinds: Vec<MismatchKind>, #[case] expected: &str) {
        let mismatch = Mismatch {
            path: "a.txt".to_string(),
            kinds,
        };
        assert_eq!(format_mismatch(&mismatch), expected);
    }

    #[test]
    fn test_list_error_block() {
        let out = render(|e| e.list_error("Broken", &["one", "two"]));
        assert_eq!(out, "Broken:\n  - one\n  - two\n\n");
    }

    #[test]
    fn test_clean_reconciliation_writes_nothing() {
        let out = render(|e| e.reconciliation(&Reconciliation::default()));
        assert!(out.is_empty());
    }

    #[test]
    fn test_reconciliation_blocks_in_order() {
        let result = Reconciliation {
            missing_on_disk: vec!["gone.txt".to_string()],
            unexpected_on_disk: vec!["new.txt".to_string()],
            mismatches: vec![Mismatch {
                path: "edit.txt".to_string(),
                kinds: vec![MismatchKind::Checksum],
            }],
        };
        let out = render(|e| e.reconciliation(&result));

        let missing = out.find(MISSING_ON_DISK_TITLE).unwrap();
        let unexpected = out.find(UNEXPECTED_ON_DISK_TITLE).unwrap();
        let mismatch = out.find(MISMATCH_TITLE).unwrap();
        assert!(missing < unexpected && unexpected < mismatch);
        assert!(out.contains("  - gone.txt\n"));
        assert!(out.contains("  - new.txt\n"));
        assert!(out.contains("  - \"edit.txt\": checksum differs.\n"));
    }

    #[test]
    fn test_summary_lines() {
        assert_eq!(render(|e| e.summary(0)), format!("{SUCCESS_MESSAGE}\n"));
        assert_eq!(
            render(|e| e.summary(4)),
            "Verification completed. Number of discrepancies found: 4\n"
        );
    }
}
