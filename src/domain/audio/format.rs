//! Source and target audio formats

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::TargetFormatParseError;

/// Audio encodings accepted as upload sources, keyed by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    M4a,
    Mp3,
    Wav,
    Aiff,
    Flac,
    Ogg,
    Opus,
    Aac,
    Wma,
    Webm,
    Caf,
}

impl SourceFormat {
    /// Every recognised source format
    pub const ALL: [SourceFormat; 11] = [
        Self::M4a,
        Self::Mp3,
        Self::Wav,
        Self::Aiff,
        Self::Flac,
        Self::Ogg,
        Self::Opus,
        Self::Aac,
        Self::Wma,
        Self::Webm,
        Self::Caf,
    ];

    /// Look up a format by file extension (case-insensitive, without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "m4a" => Some(Self::M4a),
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "aif" | "aiff" => Some(Self::Aiff),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            "opus" => Some(Self::Opus),
            "aac" => Some(Self::Aac),
            "wma" => Some(Self::Wma),
            "webm" => Some(Self::Webm),
            "caf" => Some(Self::Caf),
            _ => None,
        }
    }

    /// Canonical file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::M4a => "m4a",
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Aiff => "aiff",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Wma => "wma",
            Self::Webm => "webm",
            Self::Caf => "caf",
        }
    }

    /// Comma-separated list of supported extensions for error messages
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|f| f.extension())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encoding produced by the transcoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    #[default]
    Mp3,
    Ogg,
    Flac,
}

impl TargetFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
        }
    }

    /// File extension of converted output
    pub const fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Encoder flags passed to the transcoder.
    ///
    /// `quality` is the VBR quality scale (0 best, 9 smallest) for lossy
    /// targets and ignored for FLAC.
    pub fn codec_args(&self, quality: u8) -> Vec<String> {
        match self {
            Self::Mp3 => vec![
                "-codec:a".to_string(),
                "libmp3lame".to_string(),
                "-q:a".to_string(),
                quality.to_string(),
            ],
            // libvorbis runs its scale the other way round: 10 best, 0 smallest
            Self::Ogg => vec![
                "-codec:a".to_string(),
                "libvorbis".to_string(),
                "-q:a".to_string(),
                (9u8.saturating_sub(quality) + 1).to_string(),
            ],
            Self::Flac => vec!["-codec:a".to_string(), "flac".to_string()],
        }
    }
}

impl FromStr for TargetFormat {
    type Err = TargetFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "ogg" | "vorbis" => Ok(Self::Ogg),
            "flac" => Ok(Self::Flac),
            _ => Err(TargetFormatParseError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
