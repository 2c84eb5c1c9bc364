//! Audio format domain module

mod format;
mod source_file;

pub use format::{SourceFormat, TargetFormat};
pub use source_file::{sanitize_base_name, SourceFilename};
