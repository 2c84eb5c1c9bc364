//! Scratch space port interface

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::library::StorageError;

/// Handle to a staged upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Port for temporary storage of uploaded sources
#[async_trait]
pub trait ScratchSpace: Send + Sync {
    /// Persist upload bytes under a unique name ending in `file_name`
    async fn stage(&self, file_name: &str, bytes: &[u8]) -> Result<ScratchFile, StorageError>;

    /// Apply the retention policy to a finished job's scratch file
    async fn release(&self, file: ScratchFile);

    /// Blocking form of [`ScratchSpace::release`], for jobs dropped mid-flight
    fn abandon(&self, file: &ScratchFile);
}
