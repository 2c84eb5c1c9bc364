//! audio-depot - upload, convert and catalogue audio by project
//!
//! Uploaded audio is converted with an external transcoder (ffmpeg) and stored
//! under `<library_root>/<project>/<timestamp>_<name>.<ext>`. A Markdown listing
//! of the library can be regenerated at any time.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects (project labels, filenames, output paths), jobs and the listing
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (FFmpeg, filesystem library, XDG config)
//! - **Server**: axum router exposing the upload and listing endpoints
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod server;
