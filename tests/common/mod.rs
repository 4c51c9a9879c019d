#![allow(dead_code)]

use anyhow::Result;
use driftcheck::CheckContext;
use driftcheck::config::Config;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory with a data dir and files to fingerprint
///
/// Layout:
/// - `<root>/data/filesForCheck.txt`
/// - `<root>/data/checksum.txt`
/// - `<root>/<listed files>` (list entries are relative to `<root>`)
pub struct TestWorkspace {
    pub temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("data"))?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.path().join("data")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir().join("checksum.txt")
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.core.data_dir = self.data_dir();
        config.core.base_dir = Some(self.path().to_path_buf());
        config.generate.verbose = false;
        config
    }

    pub fn context(&self) -> Result<CheckContext> {
        CheckContext::from_config(self.config())
    }

    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn remove_file(&self, name: &str) -> Result<()> {
        fs::remove_file(self.path().join(name))?;
        Ok(())
    }

    pub fn write_list(&self, entries: &[&str]) -> Result<()> {
        fs::write(self.data_dir().join("filesForCheck.txt"), entries.join("\n"))?;
        Ok(())
    }

    pub fn manifest(&self) -> Result<String> {
        Ok(fs::read_to_string(self.manifest_path())?)
    }

    /// Files in the data directory whose name ends in `.old`
    pub fn backups(&self) -> Result<Vec<PathBuf>> {
        let mut backups: Vec<PathBuf> = fs::read_dir(self.data_dir())?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "old"))
            .collect();
        backups.sort();
        Ok(backups)
    }
}
