//! MD5 content hashing, buffered or memory-mapped by file size.

use anyhow::{Context, Result};
use md5::{Digest, Md5};
use memmap2::MmapOptions;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default size above which files are memory-mapped instead of read.
pub const DEFAULT_MMAP_THRESHOLD: u64 = 1_048_576;

/// Hex length of a digest produced by [`hash_bytes`].
pub const HASH_HEX_LEN: usize = 32;

/// MD5 of `data` as lowercase hex.
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:x}", Md5::digest(data))
}

/// Hashes the full content of `path`, returning the hex digest and the
/// number of bytes digested.
///
/// Files at or above `mmap_threshold` bytes are mapped rather than copied
/// into a buffer; either way the whole file is digested in one pass.
pub fn hash_file(path: &Path, mmap_threshold: u64) -> Result<(String, u64)> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    hash_open_file(&file, mmap_threshold)
        .with_context(|| format!("Failed to hash {}", path.display()))
}

/// Hashes an already open file. The size check and every read go through
/// `file`, so they always see the same inode.
pub fn hash_open_file(file: &File, mmap_threshold: u64) -> Result<(String, u64)> {
    let len = file.metadata().context("Failed to stat file")?.len();

    if len == 0 {
        return Ok((hash_bytes(b""), 0));
    }

    if len < mmap_threshold {
        let mut content = Vec::with_capacity(usize::try_from(len).unwrap_or_default());
        let mut reader = file;
        reader
            .read_to_end(&mut content)
            .context("Failed to read file")?;
        Ok((hash_bytes(&content), content.len() as u64))
    } else {
        // SAFETY: the mapping is read-only and dropped before returning.
        let mmap = unsafe { MmapOptions::new().map(file) }.context("Failed to map file")?;
        Ok((hash_bytes(&mmap), mmap.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    #[rstest]
    #[case(b"", "d41d8cd98f00b204e9800998ecf8427e")]
    #[case(b"abc", "900150983cd24fb0d6963f7d28e17f72")]
    #[case(b"hello world", "5eb63bbbe01eeed093cb22bb8f5acdc3")]
    fn test_hash_bytes_known_vectors(#[case] data: &[u8], #[case] expected: &str) {
        assert_eq!(hash_bytes(data), expected);
    }

    #[test]
    fn test_hash_bytes_is_lowercase_hex() {
        let hash = hash_bytes(b"Hello, World!");
        assert_eq!(hash.len(), HASH_HEX_LEN);
        assert!(
            hash.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_hash_file_matches_bytes() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.txt");
        std::fs::write(&path, "Test content for hashing")?;

        let (hash, size) = hash_file(&path, DEFAULT_MMAP_THRESHOLD)?;
        assert_eq!(hash, hash_bytes(b"Test content for hashing"));
        assert_eq!(size, 24);
        Ok(())
    }

    #[test]
    fn test_mmap_and_read_agree() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("big.bin");
        std::fs::write(&path, vec![b'q'; 8192])?;

        let read = hash_file(&path, u64::MAX)?;
        let mapped = hash_file(&path, 1)?;
        assert_eq!(read, mapped);
        assert_eq!(mapped.1, 8192);
        Ok(())
    }

    #[test]
    fn test_empty_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty");
        std::fs::write(&path, b"")?;

        let (hash, size) = hash_file(&path, 1)?;
        assert_eq!(hash, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(size, 0);
        Ok(())
    }

    #[test]
    fn test_open_file_is_hashed_after_path_is_gone() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("moving.txt");
        std::fs::write(&path, "abc")?;

        let file = File::open(&path)?;
        std::fs::remove_file(&path)?;
        std::fs::write(&path, "replacement with another size")?;

        for threshold in [u64::MAX, 1] {
            let (hash, size) = hash_open_file(&file, threshold)?;
            assert_eq!(hash, "900150983cd24fb0d6963f7d28e17f72");
            assert_eq!(size, 3);
        }
        Ok(())
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(hash_file(&dir.path().join("absent"), DEFAULT_MMAP_THRESHOLD).is_err());
    }
}
