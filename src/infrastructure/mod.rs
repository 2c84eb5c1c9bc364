//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like FFmpeg and the filesystem.

pub mod clock;
pub mod config;
pub mod storage;
pub mod transcoding;

// Re-export adapters
pub use clock::SystemClock;
pub use config::XdgConfigStore;
pub use storage::{FsLibrary, FsScratchSpace};
pub use transcoding::FfmpegTranscoder;
