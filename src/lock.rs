//! Advisory lock around manifest replacement.
//!
//! Rotating the old manifest and writing the new one happen while holding an
//! exclusive lock on `<manifest>.lock`, so two `generate` runs against the same
//! manifest cannot interleave their rename and write steps. Locks are released
//! when dropped.
//!
//! The lock file itself is left in place. Unlinking it on release would let a
//! waiter that already opened the old inode lock it while a newcomer creates
//! and locks a fresh one.

use anyhow::{Context, Result, bail};
use fs4::fs_std::FileExt;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, warn};

/// Holds an exclusive lock on a manifest path.
pub struct ManifestLock {
    /// Lock file handle
    lock_file: File,
    /// Path to the lock file (for error messages)
    lock_path: PathBuf,
}

impl ManifestLock {
    /// Lock file used for `manifest`.
    #[must_use]
    pub fn lock_path_for(manifest: &Path) -> PathBuf {
        let mut name: OsString = manifest
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_default();
        name.push(".lock");
        manifest.with_file_name(name)
    }

    /// Acquire the lock for `manifest`, waiting for a bounded time.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock file cannot be created
    /// - Another process keeps the lock past the timeout
    pub fn acquire(manifest: &Path) -> Result<Self> {
        let lock_path = Self::lock_path_for(manifest);
        let lock_file = Self::try_acquire_lock(&lock_path, manifest)?;
        debug!(lock = %lock_path.display(), "acquired manifest lock");

        Ok(Self {
            lock_file,
            lock_path,
        })
    }

    /// Try to acquire the lock file
    fn try_acquire_lock(lock_path: &Path, manifest: &Path) -> Result<File> {
        // Use shorter timeouts in test mode for faster test execution
        let lock_timeout = if cfg!(test) {
            Duration::from_millis(100)
        } else {
            Duration::from_secs(30)
        };
        let retry_interval = if cfg!(test) {
            Duration::from_millis(10)
        } else {
            Duration::from_millis(100)
        };

        let start = Instant::now();

        loop {
            // Never truncate here: the current holder's details live in the file.
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(false)
                .open(lock_path)
                .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

            match file.try_lock_exclusive() {
                Ok(true) => {
                    let mut file_ref = &file;
                    let _ = file.set_len(0);
                    let _ = writeln!(
                        file_ref,
                        "manifest={}\npid={}\ntime={}",
                        manifest.display(),
                        std::process::id(),
                        humantime::format_rfc3339(SystemTime::now())
                    );
                    return Ok(file);
                }
                Ok(false) | Err(_) if start.elapsed() < lock_timeout => {
                    std::thread::sleep(retry_interval);
                }
                Ok(false) | Err(_) => {
                    bail!(
                        "Another process is already writing manifest '{}'. \
                         Please wait for it to complete or remove stale lock at: {}",
                        manifest.display(),
                        lock_path.display()
                    );
                }
            }
        }
    }

    /// Release the lock explicitly (normally handled by Drop)
    ///
    /// # Errors
    ///
    /// Returns an error if the lock file cannot be unlocked
    pub fn release(self) -> Result<()> {
        FileExt::unlock(&self.lock_file)?;
        Ok(())
    }
}

impl Drop for ManifestLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.lock_file) {
            warn!(
                lock = %self.lock_path.display(),
                error = %e,
                "failed to unlock manifest lock"
            );
        }
    }
}
