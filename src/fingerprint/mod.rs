//! Per-file content fingerprints.
//!
//! A fingerprint is the (hash, size) pair of a file at the moment it was
//! read. [`FingerprintRecord`] ties that pair to a path; [`FingerprintSet`]
//! indexes records by path for reconciliation.
//!
//! # Submodules
//!
//! - [`engine`]: walks a file list and fingerprints each existing file
//! - [`hash`]: MD5 digest of file content

pub mod engine;
pub mod hash;

pub use engine::{FingerprintOptions, FingerprintRun, compute_fingerprints};

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Fingerprint of a single file.
///
/// `size` is kept as the decimal text written to the manifest so that model
/// and current fingerprints compare exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FingerprintRecord {
    /// Path as it appears in the file list
    pub path: String,
    /// Lowercase hex MD5 of the content
    pub hash: String,
    /// Byte length as a decimal string
    pub size: String,
}

impl FingerprintRecord {
    /// Creates a record from a computed digest and byte count.
    #[must_use]
    pub fn new(path: impl Into<String>, hash: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            hash: hash.into(),
            size: size_bytes.to_string(),
        }
    }

    /// Parses the stored size back into a byte count.
    #[must_use]
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.parse().ok()
    }
}

/// Fingerprint records keyed by path.
///
/// Built once from a sequence of records; a later record for a path
/// replaces an earlier one. Iteration is in lexicographic path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintSet {
    records: BTreeMap<String, FingerprintRecord>,
}

impl FingerprintSet {
    /// Builds a set from records, last write wins on duplicate paths.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = FingerprintRecord>) -> Self {
        records.into_iter().collect()
    }

    /// Record stored for `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FingerprintRecord> {
        self.records.get(path)
    }

    /// Whether a record exists for `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.records.contains_key(path)
    }

    /// Number of distinct paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Records in lexicographic path order.
    pub fn iter(&self) -> btree_map::Values<'_, String, FingerprintRecord> {
        self.records.values()
    }
}

impl FromIterator<FingerprintRecord> for FingerprintSet {
    fn from_iter<I: IntoIterator<Item = FingerprintRecord>>(iter: I) -> Self {
        let mut records = BTreeMap::new();
        for record in iter {
            records.insert(record.path.clone(), record);
        }
        Self { records }
    }
}

impl<'a> IntoIterator for &'a FingerprintSet {
    type Item = &'a FingerprintRecord;
    type IntoIter = btree_map::Values<'a, String, FingerprintRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
