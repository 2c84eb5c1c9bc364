//! FFmpeg-based transcoder adapter

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::application::ports::{TranscodeError, Transcoder};
use crate::domain::audio::TargetFormat;
use crate::domain::config::{DEFAULT_QUALITY, DEFAULT_TRANSCODER};

/// Runs an ffmpeg-compatible executable once per conversion
pub struct FfmpegTranscoder {
    /// Executable name or path
    program: PathBuf,
    /// VBR quality passed to lossy encoders
    quality: u8,
}

impl FfmpegTranscoder {
    /// Create a transcoder using `ffmpeg` from PATH
    pub fn new() -> Self {
        Self::with_program(DEFAULT_TRANSCODER)
    }

    /// Create a transcoder using a specific executable
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            quality: DEFAULT_QUALITY,
        }
    }

    /// Set the VBR quality
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Build the fixed argument list for one conversion
    fn build_args(input: &Path, output: &Path, target: TargetFormat, quality: u8) -> Vec<String> {
        let mut args = vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-nostdin".to_string(),
            "-y".to_string(), // Overwrite the reserved placeholder
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-vn".to_string(), // Skip embedded cover art
        ];

        args.extend(target.codec_args(quality));
        args.push(output.to_string_lossy().to_string());

        args
    }

    /// Last non-empty stderr line, which is where ffmpeg puts the reason
    fn stderr_summary(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        text.lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("unknown error")
            .to_string()
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        target: TargetFormat,
    ) -> Result<(), TranscodeError> {
        let args = Self::build_args(input, output, target, self.quality);

        debug!(
            program = %self.program.display(),
            args = ?args,
            "spawning transcoder"
        );

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TranscodeError::NotFound(self.program.display().to_string())
                } else {
                    TranscodeError::SpawnFailed(e.to_string())
                }
            })?;

        if !result.status.success() {
            let detail = Self::stderr_summary(&result.stderr);
            warn!(status = %result.status, detail = %detail, "transcoder exited with error");
            return Err(TranscodeError::ExitFailure {
                status: result.status.to_string(),
                detail,
            });
        }

        Ok(())
    }
}
