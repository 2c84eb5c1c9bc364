//! Conversion job domain module

mod conversion_job;
mod output_path;

pub use conversion_job::{ConversionJob, JobStatus};
pub use output_path::{OutputPath, TIMESTAMP_FORMAT};
