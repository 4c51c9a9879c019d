//! Three-way comparison between a recorded manifest and the current files.
//!
//! Everything here is pure: the functions take two [`FingerprintSet`]s and
//! return sorted discrepancy lists. Rendering lives in
//! [`crate::output::report`].

use crate::fingerprint::FingerprintSet;
use std::fmt;

/// A property that differs between the model and current fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MismatchKind {
    /// Content hash differs
    Checksum,
    /// Byte size differs
    Size,
}

impl MismatchKind {
    /// Human-readable sub-message used in reports
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Checksum => "checksum differs",
            Self::Size => "size differs",
        }
    }
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A path present in both sets whose fingerprint changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Path as listed
    pub path: String,
    /// Non-empty; checksum before size when both apply
    pub kinds: Vec<MismatchKind>,
}

/// Outcome of comparing a model set against a current set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// In the model but not found now
    pub missing_on_disk: Vec<String>,
    /// Found now but not in the model
    pub unexpected_on_disk: Vec<String>,
    /// In both, with a different hash or size
    pub mismatches: Vec<Mismatch>,
}

impl Reconciliation {
    /// Total discrepancies: one per path in each category.
    ///
    /// A path whose hash and size both changed counts once.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.missing_on_disk.len() + self.unexpected_on_disk.len() + self.mismatches.len()
    }

    /// No discrepancies of any kind.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }
}

/// Paths of `a` that are absent from `b`, sorted.
#[must_use]
pub fn paths_only_in(a: &FingerprintSet, b: &FingerprintSet) -> Vec<String> {
    a.paths()
        .filter(|path| !b.contains(path))
        .map(String::from)
        .collect()
}

/// Paths present in both sets whose hash or size differ, sorted.
///
/// Paths found in only one set are skipped; [`paths_only_in`] covers them.
#[must_use]
pub fn value_mismatches(model: &FingerprintSet, current: &FingerprintSet) -> Vec<Mismatch> {
    current
        .iter()
        .filter_map(|now| {
            let expected = model.get(&now.path)?;

            let mut kinds = Vec::new();
            if now.hash != expected.hash {
                kinds.push(MismatchKind::Checksum);
            }
            if now.size != expected.size {
                kinds.push(MismatchKind::Size);
            }

            (!kinds.is_empty()).then(|| Mismatch {
                path: now.path.clone(),
                kinds,
            })
        })
        .collect()
}

/// Runs every comparison between `model` and `current`.
#[must_use]
pub fn reconcile(model: &FingerprintSet, current: &FingerprintSet) -> Reconciliation {
    Reconciliation {
        missing_on_disk: paths_only_in(model, current),
        unexpected_on_disk: paths_only_in(current, model),
        mismatches: value_mismatches(model, current),
    }
}
