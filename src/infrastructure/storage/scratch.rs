//! Filesystem scratch space adapter

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{ScratchFile, ScratchSpace, StorageError};

/// Stages uploads in a directory under unique names.
///
/// Staged files are deleted on release unless `keep` is set.
pub struct FsScratchSpace {
    dir: PathBuf,
    keep: bool,
}

impl FsScratchSpace {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            keep: false,
        }
    }

    /// Retain staged files after their job finishes
    pub fn keep_files(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ScratchSpace for FsScratchSpace {
    async fn stage(&self, file_name: &str, bytes: &[u8]) -> Result<ScratchFile, StorageError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::CreateDirFailed {
                path: self.dir.display().to_string(),
                message: e.to_string(),
            })?;

        let path = self.dir.join(format!("{}-{}", Uuid::new_v4(), file_name));
        let write_failed = |e: std::io::Error| StorageError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(write_failed)?;
        file.write_all(bytes).await.map_err(write_failed)?;
        file.flush().await.map_err(write_failed)?;

        Ok(ScratchFile::new(path))
    }

    async fn release(&self, file: ScratchFile) {
        if self.keep {
            debug!(path = %file.path().display(), "keeping scratch file");
            return;
        }
        if let Err(e) = fs::remove_file(file.path()).await {
            warn!(path = %file.path().display(), error = %e, "failed to remove scratch file");
        }
    }

    fn abandon(&self, file: &ScratchFile) {
        if self.keep {
            return;
        }
        match std::fs::remove_file(file.path()) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %file.path().display(), error = %e, "failed to remove scratch file")
            }
        }
    }
}
