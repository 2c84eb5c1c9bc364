//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clock;
pub mod config;
pub mod library;
pub mod scratch;
pub mod transcoder;

// Re-export common types
pub use clock::Clock;
pub use config::ConfigStore;
pub use library::{Library, StorageError};
pub use scratch::{ScratchFile, ScratchSpace};
pub use transcoder::{TranscodeError, Transcoder};
