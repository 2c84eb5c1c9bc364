//! Domain error types

use thiserror::Error;

/// Error when a submission fails validation.
/// Raised before any scratch file is written or transcoder started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Uploaded file is empty")]
    EmptyFile,

    #[error("Invalid project label: \"{input}\". Use 1-64 letters, digits, '-' or '_', starting with a letter or digit")]
    InvalidProjectLabel { input: String },

    #[error("Unrecognized source audio file: \"{input}\". Supported extensions: {supported}")]
    UnsupportedSource { input: String, supported: String },
}

/// Error when parsing a target format name
#[derive(Debug, Clone, Error)]
#[error("Invalid target format: \"{input}\". Valid formats are: mp3, ogg, flac")]
pub struct TargetFormatParseError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
