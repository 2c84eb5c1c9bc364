//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Persistent settings file backing `audio-depot config`
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the stored settings.
    ///
    /// A missing file is not an error: every field comes back `None` and the
    /// caller layers defaults underneath.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored settings with `config`
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the settings file
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write the built-in defaults. Fails with `AlreadyExists` when a file is present.
    async fn init(&self) -> Result<(), ConfigError>;
}
