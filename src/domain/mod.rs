//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod audio;
pub mod config;
pub mod error;
pub mod job;
pub mod library;
pub mod project;

// Re-export common types
pub use audio::{SourceFilename, SourceFormat, TargetFormat};
pub use config::AppConfig;
pub use error::*;
pub use job::{ConversionJob, JobStatus, OutputPath};
pub use library::{ListingDocument, ProjectListing};
pub use project::ProjectLabel;
