//! Conversion job entity

use std::fmt;

use crate::domain::audio::SourceFilename;
use crate::domain::project::ProjectLabel;

use super::output_path::OutputPath;

/// Lifecycle of a single submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upload being converted.
///
/// Lives for the duration of a request; only the output file outlives it.
#[derive(Debug)]
pub struct ConversionJob {
    source_filename: SourceFilename,
    project_label: ProjectLabel,
    submitted_bytes: Vec<u8>,
    output_path: OutputPath,
    status: JobStatus,
}

impl ConversionJob {
    pub fn new(
        source_filename: SourceFilename,
        project_label: ProjectLabel,
        submitted_bytes: Vec<u8>,
        output_path: OutputPath,
    ) -> Self {
        Self {
            source_filename,
            project_label,
            submitted_bytes,
            output_path,
            status: JobStatus::Pending,
        }
    }

    pub fn source_filename(&self) -> &SourceFilename {
        &self.source_filename
    }

    pub fn project_label(&self) -> &ProjectLabel {
        &self.project_label
    }

    pub fn submitted_bytes(&self) -> &[u8] {
        &self.submitted_bytes
    }

    pub fn output_path(&self) -> &OutputPath {
        &self.output_path
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Record the outcome. Only the first transition out of `Pending` sticks.
    pub fn complete(&mut self, succeeded: bool) {
        if self.status.is_terminal() {
            return;
        }
        self.status = if succeeded {
            JobStatus::Succeeded
        } else {
            JobStatus::Failed
        };
    }

    /// Drop the upload payload once it has been staged to scratch space
    pub fn release_bytes(&mut self) {
        self.submitted_bytes = Vec::new();
    }
}
