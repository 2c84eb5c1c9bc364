//! Uploaded source filename value object

use std::path::Path;

use crate::domain::error::InvalidInputError;

use super::format::SourceFormat;

/// Base name used when sanitizing leaves nothing behind
const FALLBACK_BASE_NAME: &str = "audio";

/// Filename supplied alongside an upload.
/// Validated to carry a recognised audio extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilename {
    original: String,
    base_name: String,
    format: SourceFormat,
}

impl SourceFilename {
    /// Parse a client-supplied filename.
    ///
    /// Any directory components are discarded; only the final component
    /// counts, so `../../x.wav` behaves like `x.wav`.
    pub fn parse(input: &str) -> Result<Self, InvalidInputError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InvalidInputError::MissingField("file"));
        }

        let unsupported = || InvalidInputError::UnsupportedSource {
            input: input.to_string(),
            supported: SourceFormat::supported_list(),
        };

        // Browsers on Windows may send backslash-separated paths
        let last = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
        let path = Path::new(last);

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(SourceFormat::from_extension)
            .ok_or_else(unsupported)?;

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");

        Ok(Self {
            original: trimmed.to_string(),
            base_name: sanitize_base_name(stem),
            format,
        })
    }

    /// Filename as received
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Filesystem-safe stem used for the output name
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }
}

/// Longest base name kept, in bytes. Leaves room for the timestamp,
/// scratch prefix and extension under the usual 255-byte name limit.
pub const MAX_BASE_NAME_LEN: usize = 100;

/// Reduce a file stem to ASCII letters, digits, `-` and `_`.
///
/// `-` and `_` are kept as typed. Every run of other characters becomes one
/// `-` unless it already borders a dash. The result is cut to
/// [`MAX_BASE_NAME_LEN`] and dashes are trimmed from both ends.
pub fn sanitize_base_name(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len().min(MAX_BASE_NAME_LEN));
    let mut pending_dash = false;

    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            if pending_dash && ch != '-' && !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
        if out.len() >= MAX_BASE_NAME_LEN {
            break;
        }
    }

    let mut cut = out.len().min(MAX_BASE_NAME_LEN);
    while !out.is_char_boundary(cut) {
        cut -= 1;
    }
    out.truncate(cut);

    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
