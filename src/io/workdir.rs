//! Output and scratch directory management

use crate::io::error::{Result, file_system};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCRATCH_PREFIX: &str = ".anatseg-";

/// An existing directory, addressed by its absolute path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Create the directory (and parents) if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or resolved
    pub fn create(path: &Path) -> Result<Self> {
        fs::create_dir_all(path).map_err(file_system(path, "create directory"))?;
        let path = std::path::absolute(path).map_err(file_system(path, "resolve absolute path"))?;
        Ok(Self { path })
    }

    /// Absolute path of the directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of an entry inside the directory
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }

    /// Create a scratch directory inside this one, removed on drop
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub fn scratch(&self) -> Result<TempDir> {
        tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(&self.path)
            .map_err(file_system(&self.path, "create scratch directory"))
    }
}
