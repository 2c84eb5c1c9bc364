//! Library storage port interface

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::TargetFormat;
use crate::domain::job::OutputPath;
use crate::domain::library::ProjectListing;

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {message}")]
    CreateDirFailed { path: String, message: String },

    #[error("Output path already taken: {0}")]
    AlreadyExists(String),

    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },
}

/// Port for the project-grouped output library
#[async_trait]
pub trait Library: Send + Sync {
    /// Library root directory
    fn root(&self) -> &Path;

    /// Create the project directory if needed and claim `output` exclusively.
    ///
    /// Fails with [`StorageError::AlreadyExists`] when another job already
    /// holds the same path.
    ///
    /// # Returns
    /// The absolute path of the reserved (empty) file
    async fn reserve(&self, output: &OutputPath) -> Result<PathBuf, StorageError>;

    /// Remove a reserved or partially written output. Missing files are fine.
    async fn discard(&self, output: &OutputPath) -> Result<(), StorageError>;

    /// Blocking best-effort removal of `output`, for jobs dropped mid-flight
    /// where no async context is left to await [`Library::discard`]
    fn abandon(&self, output: &OutputPath);

    /// Size in bytes of a stored output
    async fn size_of(&self, output: &OutputPath) -> Result<u64, StorageError>;

    /// List immediate project directories and the files in each with the
    /// given extension
    async fn scan(&self, target: TargetFormat) -> Result<Vec<ProjectListing>, StorageError>;

    /// Replace the listing document at `file_name` under the root
    async fn write_listing(&self, file_name: &str, content: &str)
        -> Result<PathBuf, StorageError>;
}
