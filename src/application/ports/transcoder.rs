//! Transcoder port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::TargetFormat;

/// Transcoding errors
#[derive(Debug, Clone, Error)]
pub enum TranscodeError {
    #[error("Transcoder not found: {0}")]
    NotFound(String),

    #[error("Failed to start transcoder: {0}")]
    SpawnFailed(String),

    #[error("Transcoder exited with {status}: {detail}")]
    ExitFailure { status: String, detail: String },

    #[error("Transcoder produced no output")]
    EmptyOutput,
}

/// Port for the external audio transcoder
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Convert `input` into `output` using the given target encoding.
    ///
    /// # Arguments
    /// * `input` - Path to the staged source file
    /// * `output` - Destination path; may already exist as an empty reservation
    /// * `target` - Output encoding
    ///
    /// # Returns
    /// `Ok(())` once the transcoder exits zero
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        target: TargetFormat,
    ) -> Result<(), TranscodeError>;
}

#[async_trait]
impl<T> Transcoder for Box<T>
where
    T: Transcoder + ?Sized,
{
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        target: TargetFormat,
    ) -> Result<(), TranscodeError> {
        (**self).transcode(input, output, target).await
    }
}
