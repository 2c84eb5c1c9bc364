//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::audio::TargetFormat;

/// Default HTTP bind address
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Default listing document filename, relative to the library root
pub const DEFAULT_INDEX_FILE: &str = "INDEX.md";

/// Default transcoder executable
pub const DEFAULT_TRANSCODER: &str = "ffmpeg";

/// Default VBR quality (0 best, 9 smallest)
pub const DEFAULT_QUALITY: u8 = 2;

/// Highest accepted VBR quality value
pub const MAX_QUALITY: u8 = 9;

/// Default upload size limit in megabytes
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 200;

/// Transcoder-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscoderConfig {
    pub program: Option<String>,
    pub format: Option<String>,
    pub quality: Option<u8>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub bind: Option<String>,
    pub library_root: Option<String>,
    pub scratch_dir: Option<String>,
    pub keep_scratch: Option<bool>,
    pub index_on_submit: Option<bool>,
    pub index_file: Option<String>,
    pub max_upload_mb: Option<u64>,
    pub transcoder: Option<TranscoderConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            bind: Some(DEFAULT_BIND.to_string()),
            library_root: Some(default_library_root().to_string_lossy().to_string()),
            scratch_dir: None,
            keep_scratch: Some(false),
            index_on_submit: Some(true),
            index_file: Some(DEFAULT_INDEX_FILE.to_string()),
            max_upload_mb: Some(DEFAULT_MAX_UPLOAD_MB),
            transcoder: Some(TranscoderConfig {
                program: Some(DEFAULT_TRANSCODER.to_string()),
                format: Some(TargetFormat::default().to_string()),
                quality: Some(DEFAULT_QUALITY),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            bind: other.bind.or(self.bind),
            library_root: other.library_root.or(self.library_root),
            scratch_dir: other.scratch_dir.or(self.scratch_dir),
            keep_scratch: other.keep_scratch.or(self.keep_scratch),
            index_on_submit: other.index_on_submit.or(self.index_on_submit),
            index_file: other.index_file.or(self.index_file),
            max_upload_mb: other.max_upload_mb.or(self.max_upload_mb),
            transcoder: Self::merge_transcoder_config(self.transcoder, other.transcoder),
        }
    }

    /// Merge transcoder config sections
    fn merge_transcoder_config(
        base: Option<TranscoderConfig>,
        other: Option<TranscoderConfig>,
    ) -> Option<TranscoderConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(TranscoderConfig {
                program: o.program.or(b.program),
                format: o.format.or(b.format),
                quality: o.quality.or(b.quality),
            }),
        }
    }

    /// Get bind address, or the loopback default if not set
    pub fn bind_or_default(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    /// Get library root, or `~/Music/audio-depot` if not set
    pub fn library_root_or_default(&self) -> PathBuf {
        self.library_root
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_library_root)
    }

    /// Get scratch directory, or `<tmp>/audio-depot` if not set
    pub fn scratch_dir_or_default(&self) -> PathBuf {
        self.scratch_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("audio-depot"))
    }

    /// Get keep_scratch setting, or false if not set
    pub fn keep_scratch_or_default(&self) -> bool {
        self.keep_scratch.unwrap_or(false)
    }

    /// Get index_on_submit setting, or true if not set
    pub fn index_on_submit_or_default(&self) -> bool {
        self.index_on_submit.unwrap_or(true)
    }

    /// Get listing filename, or "INDEX.md" if not set
    pub fn index_file_or_default(&self) -> &str {
        self.index_file.as_deref().unwrap_or(DEFAULT_INDEX_FILE)
    }

    /// Get upload limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        let mb = self.max_upload_mb.unwrap_or(DEFAULT_MAX_UPLOAD_MB);
        usize::try_from(mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }

    /// Get transcoder program, or "ffmpeg" if not set
    pub fn transcoder_program_or_default(&self) -> &str {
        self.transcoder
            .as_ref()
            .and_then(|t| t.program.as_deref())
            .unwrap_or(DEFAULT_TRANSCODER)
    }

    /// Get target format as parsed TargetFormat, or mp3 if not set/invalid.
    /// An invalid stored value is logged before falling back.
    pub fn target_format_or_default(&self) -> TargetFormat {
        let Some(raw) = self.transcoder.as_ref().and_then(|t| t.format.as_deref()) else {
            return TargetFormat::default();
        };
        match raw.parse() {
            Ok(format) => format,
            Err(e) => {
                let fallback = TargetFormat::default();
                warn!(error = %e, fallback = %fallback, "ignoring configured transcoder.format");
                fallback
            }
        }
    }

    /// Get VBR quality, or 2 if not set. Values above 9 are clamped.
    pub fn quality_or_default(&self) -> u8 {
        let quality = self
            .transcoder
            .as_ref()
            .and_then(|t| t.quality)
            .unwrap_or(DEFAULT_QUALITY);
        if quality > MAX_QUALITY {
            warn!(quality, max = MAX_QUALITY, "transcoder.quality out of range, clamping");
            return MAX_QUALITY;
        }
        quality
    }
}

/// `~/Music/audio-depot`, falling back to `./audio-depot`
fn default_library_root() -> PathBuf {
    dirs::audio_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Music")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("audio-depot")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.bind, Some("127.0.0.1:8000".to_string()));
        assert!(config.library_root.is_some());
        assert!(config.scratch_dir.is_none());
        assert_eq!(config.keep_scratch, Some(false));
        assert_eq!(config.index_on_submit, Some(true));
        assert_eq!(config.index_file, Some("INDEX.md".to_string()));
        assert_eq!(config.max_upload_mb, Some(200));
        let transcoder = config.transcoder.as_ref().unwrap();
        assert_eq!(transcoder.program, Some("ffmpeg".to_string()));
        assert_eq!(transcoder.format, Some("mp3".to_string()));
        assert_eq!(transcoder.quality, Some(2));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.bind.is_none());
        assert!(config.library_root.is_none());
        assert!(config.keep_scratch.is_none());
        assert!(config.transcoder.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            bind: Some("127.0.0.1:8000".to_string()),
            library_root: Some("/base".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            bind: None,
            library_root: Some("/other".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.bind, Some("127.0.0.1:8000".to_string()));
        assert_eq!(merged.library_root, Some("/other".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            keep_scratch: Some(true),
            ..Default::default()
        };
        let merged = base.merge(AppConfig::empty());
        assert_eq!(merged.keep_scratch, Some(true));
    }

    #[test]
    fn merge_transcoder_config() {
        let base = AppConfig {
            transcoder: Some(TranscoderConfig {
                program: Some("ffmpeg".to_string()),
                quality: Some(2),
                ..Default::default()
            }),
            ..Default::default()
        };
        let other = AppConfig {
            transcoder: Some(TranscoderConfig {
                program: Some("/opt/bin/ffmpeg".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = base.merge(other);
        assert_eq!(merged.transcoder_program_or_default(), "/opt/bin/ffmpeg");
        assert_eq!(merged.quality_or_default(), 2);
    }

    #[test]
    fn target_format_or_default_parses() {
        let config = AppConfig {
            transcoder: Some(TranscoderConfig {
                format: Some("flac".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.target_format_or_default(), TargetFormat::Flac);
    }

    #[test]
    fn target_format_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            transcoder: Some(TranscoderConfig {
                format: Some("wav".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.target_format_or_default(), TargetFormat::Mp3);
    }

    #[test]
    fn quality_out_of_range_is_clamped() {
        let config = AppConfig {
            transcoder: Some(TranscoderConfig {
                quality: Some(50),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.quality_or_default(), MAX_QUALITY);
    }

    #[test]
    fn quality_in_range_is_kept() {
        for quality in [0, 5, MAX_QUALITY] {
            let config = AppConfig {
                transcoder: Some(TranscoderConfig {
                    quality: Some(quality),
                    ..Default::default()
                }),
                ..Default::default()
            };
            assert_eq!(config.quality_or_default(), quality);
        }
    }

    #[test]
    fn scalar_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.bind_or_default(), "127.0.0.1:8000");
        assert!(!config.keep_scratch_or_default());
        assert!(config.index_on_submit_or_default());
        assert_eq!(config.index_file_or_default(), "INDEX.md");
        assert_eq!(config.transcoder_program_or_default(), "ffmpeg");
        assert_eq!(config.quality_or_default(), 2);
        assert_eq!(config.max_upload_bytes(), 200 * 1024 * 1024);
    }

    #[test]
    fn library_root_default_ends_with_crate_dir() {
        let root = AppConfig::empty().library_root_or_default();
        assert!(root.ends_with("audio-depot"));
    }

    #[test]
    fn scratch_dir_uses_configured_path() {
        let config = AppConfig {
            scratch_dir: Some("/var/tmp/depot".to_string()),
            ..Default::default()
        };
        assert_eq!(config.scratch_dir_or_default(), PathBuf::from("/var/tmp/depot"));
    }
}
