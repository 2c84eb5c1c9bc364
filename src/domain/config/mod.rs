//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, TranscoderConfig, DEFAULT_BIND, DEFAULT_INDEX_FILE, DEFAULT_MAX_UPLOAD_MB,
    DEFAULT_QUALITY, DEFAULT_TRANSCODER, MAX_QUALITY,
};
