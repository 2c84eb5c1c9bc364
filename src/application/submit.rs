//! Submit conversion use case

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::audio::{SourceFilename, TargetFormat};
use crate::domain::error::InvalidInputError;
use crate::domain::job::{ConversionJob, OutputPath};
use crate::domain::project::ProjectLabel;

use super::index::write_listing;
use super::ports::{
    Clock, Library, ScratchFile, ScratchSpace, StorageError, TranscodeError, Transcoder,
};

/// Errors from the submit use case
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error("Conversion failed: {0}")]
    TranscodeFailure(#[from] TranscodeError),

    #[error("Conversion failed: {0}")]
    StorageFailure(#[from] StorageError),
}

impl SubmitError {
    /// Short machine-friendly kind, used in logs and API messages
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::TranscodeFailure(_) => "transcode_failure",
            Self::StorageFailure(_) => "storage_failure",
        }
    }
}

/// Input parameters for the submit use case.
/// Fields are optional so that absent form fields can be reported uniformly.
#[derive(Debug, Clone, Default)]
pub struct SubmitInput {
    /// Uploaded audio payload
    pub file_bytes: Option<Vec<u8>>,
    /// Filename the client sent with the payload
    pub original_filename: Option<String>,
    /// Project grouping key
    pub project_label: Option<String>,
}

/// Output from the submit use case
#[derive(Debug, Clone)]
pub struct SubmitOutput {
    /// Library-relative output path
    pub output_path: OutputPath,
    /// Absolute path of the converted file
    pub absolute_path: PathBuf,
    /// Size of the converted file
    pub size_bytes: u64,
    /// Listing document path, when regenerated
    pub index_path: Option<PathBuf>,
}

/// Conversion settings shared by every submission
#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub target: TargetFormat,
    pub index_on_submit: bool,
    pub index_file: String,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            target: TargetFormat::default(),
            index_on_submit: true,
            index_file: crate::domain::config::DEFAULT_INDEX_FILE.to_string(),
        }
    }
}

/// Upload → scratch → transcode → store pipeline
pub struct SubmitConversionUseCase<T, L, S, C>
where
    T: Transcoder,
    L: Library,
    S: ScratchSpace,
    C: Clock,
{
    transcoder: T,
    library: L,
    scratch: S,
    clock: C,
    settings: SubmitSettings,
}

impl<T, L, S, C> SubmitConversionUseCase<T, L, S, C>
where
    T: Transcoder,
    L: Library,
    S: ScratchSpace,
    C: Clock,
{
    /// Create a new use case instance
    pub fn new(transcoder: T, library: L, scratch: S, clock: C, settings: SubmitSettings) -> Self {
        Self {
            transcoder,
            library,
            scratch,
            clock,
            settings,
        }
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn settings(&self) -> &SubmitSettings {
        &self.settings
    }

    /// Execute the conversion workflow
    pub async fn execute(&self, input: SubmitInput) -> Result<SubmitOutput, SubmitError> {
        let (source, project, bytes) = Self::validate(input)?;

        let submitted_at = self.clock.now();
        let output_path =
            OutputPath::derive(&project, &source, self.settings.target, &submitted_at);
        let mut job = ConversionJob::new(source, project, bytes, output_path);

        info!(
            project = %job.project_label(),
            source = job.source_filename().original(),
            output = %job.output_path(),
            size_bytes = job.submitted_bytes().len(),
            "conversion job accepted"
        );

        let result = self.run(&mut job).await;
        job.complete(result.is_ok());

        let size_bytes = match result {
            Ok(size) => size,
            Err(e) => {
                error!(
                    output = %job.output_path(),
                    status = %job.status(),
                    kind = e.kind(),
                    error = %e,
                    "conversion job failed"
                );
                return Err(e);
            }
        };

        info!(
            output = %job.output_path(),
            status = %job.status(),
            size_bytes,
            "conversion job finished"
        );

        let index_path = if self.settings.index_on_submit {
            match write_listing(&self.library, self.settings.target, &self.settings.index_file)
                .await
            {
                Ok(out) => Some(out.index_path),
                Err(e) => {
                    warn!(error = %e, "index regeneration after submit failed");
                    None
                }
            }
        } else {
            None
        };

        Ok(SubmitOutput {
            absolute_path: job.output_path().resolve(self.library.root()),
            output_path: job.output_path().clone(),
            size_bytes,
            index_path,
        })
    }

    /// Check required fields before anything touches the filesystem
    fn validate(
        input: SubmitInput,
    ) -> Result<(SourceFilename, ProjectLabel, Vec<u8>), InvalidInputError> {
        let bytes = input
            .file_bytes
            .ok_or(InvalidInputError::MissingField("file"))?;
        let project_raw = input
            .project_label
            .ok_or(InvalidInputError::MissingField("project"))?;
        let filename_raw = input
            .original_filename
            .ok_or(InvalidInputError::MissingField("file"))?;

        let project = ProjectLabel::parse(&project_raw)?;
        let source = SourceFilename::parse(&filename_raw)?;

        if bytes.is_empty() {
            return Err(InvalidInputError::EmptyFile);
        }

        Ok((source, project, bytes))
    }

    /// Stage, convert and apply scratch retention
    async fn run(&self, job: &mut ConversionJob) -> Result<u64, SubmitError> {
        let scratch_name = format!(
            "{}.{}",
            job.source_filename().base_name(),
            job.source_filename().format().extension()
        );
        let mut in_flight = InFlight::new(&self.library, &self.scratch, job.output_path().clone());

        let scratch = self
            .scratch
            .stage(&scratch_name, job.submitted_bytes())
            .await?;
        in_flight.staged = Some(scratch.clone());
        job.release_bytes();

        debug!(scratch = %scratch.path().display(), "upload staged");

        let outcome = self.convert(job, scratch.path(), &mut in_flight).await;
        in_flight.reserved = false;
        self.scratch.release(scratch).await;
        in_flight.staged = None;
        outcome
    }

    async fn convert(
        &self,
        job: &ConversionJob,
        input: &std::path::Path,
        in_flight: &mut InFlight<'_, L, S>,
    ) -> Result<u64, SubmitError> {
        let output = job.output_path();
        let destination = self.library.reserve(output).await?;
        in_flight.reserved = true;

        if let Err(e) = self
            .transcoder
            .transcode(input, &destination, self.settings.target)
            .await
        {
            self.discard_partial(output).await;
            return Err(e.into());
        }

        match self.library.size_of(output).await {
            Ok(0) => {
                self.discard_partial(output).await;
                Err(TranscodeError::EmptyOutput.into())
            }
            Ok(size) => Ok(size),
            Err(e) => {
                self.discard_partial(output).await;
                Err(e.into())
            }
        }
    }

    async fn discard_partial(&self, output: &OutputPath) {
        if let Err(e) = self.library.discard(output).await {
            warn!(output = %output, error = %e, "failed to remove partial output");
        }
    }
}

/// Cleans up after a job whose future is dropped before it settles
/// (client disconnect, timeout). Each field is cleared once the normal
/// path has handled it.
struct InFlight<'a, L: Library, S: ScratchSpace> {
    library: &'a L,
    scratch: &'a S,
    output: OutputPath,
    reserved: bool,
    staged: Option<ScratchFile>,
}

impl<'a, L: Library, S: ScratchSpace> InFlight<'a, L, S> {
    fn new(library: &'a L, scratch: &'a S, output: OutputPath) -> Self {
        Self {
            library,
            scratch,
            output,
            reserved: false,
            staged: None,
        }
    }
}

impl<L: Library, S: ScratchSpace> Drop for InFlight<'_, L, S> {
    fn drop(&mut self) {
        if !self.reserved && self.staged.is_none() {
            return;
        }
        warn!(output = %self.output, "conversion job abandoned, cleaning up");
        if self.reserved {
            self.library.abandon(&self.output);
        }
        if let Some(file) = self.staged.take() {
            self.scratch.abandon(&file);
        }
    }
}
