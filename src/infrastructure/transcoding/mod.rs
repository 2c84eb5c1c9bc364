//! Transcoding infrastructure module

mod ffmpeg;

pub use ffmpeg::FfmpegTranscoder;
