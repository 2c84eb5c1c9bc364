//! Config command handler

use std::net::SocketAddr;

use crate::application::ports::ConfigStore;
use crate::domain::audio::TargetFormat;
use crate::domain::config::{AppConfig, TranscoderConfig, MAX_QUALITY};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match read_config_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_config_value(&config, key).unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_config_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "bind" => {
            value
                .parse::<SocketAddr>()
                .map_err(|e| invalid(key, format!("Expected host:port ({})", e)))?;
            config.bind = Some(value.to_string());
        }
        "library_root" => config.library_root = Some(non_empty(key, value)?),
        "scratch_dir" => config.scratch_dir = Some(non_empty(key, value)?),
        "keep_scratch" => config.keep_scratch = Some(parse_bool_value(key, value)?),
        "index_on_submit" => config.index_on_submit = Some(parse_bool_value(key, value)?),
        "index_file" => {
            if value.is_empty() || value.contains(['/', '\\']) || value.starts_with('.') {
                return Err(invalid(key, "Must be a plain file name, e.g. INDEX.md"));
            }
            config.index_file = Some(value.to_string());
        }
        "max_upload_mb" => {
            let mb = value
                .parse::<u64>()
                .ok()
                .filter(|mb| *mb > 0)
                .ok_or_else(|| invalid(key, "Value must be a positive whole number"))?;
            config.max_upload_mb = Some(mb);
        }
        "transcoder.program" => {
            transcoder_section(config).program = Some(non_empty(key, value)?);
        }
        "transcoder.format" => {
            let format = value
                .parse::<TargetFormat>()
                .map_err(|e| invalid(key, e.to_string()))?;
            transcoder_section(config).format = Some(format.to_string());
        }
        "transcoder.quality" => {
            let quality = value
                .parse::<u8>()
                .ok()
                .filter(|q| *q <= MAX_QUALITY)
                .ok_or_else(|| invalid(key, "Value must be between 0 and 9"))?;
            transcoder_section(config).quality = Some(quality);
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

/// Read the stored value for `key`, if any
fn read_config_value(config: &AppConfig, key: &str) -> Option<String> {
    let transcoder = config.transcoder.as_ref();
    match key {
        "bind" => config.bind.clone(),
        "library_root" => config.library_root.clone(),
        "scratch_dir" => config.scratch_dir.clone(),
        "keep_scratch" => config.keep_scratch.map(|b| b.to_string()),
        "index_on_submit" => config.index_on_submit.map(|b| b.to_string()),
        "index_file" => config.index_file.clone(),
        "max_upload_mb" => config.max_upload_mb.map(|mb| mb.to_string()),
        "transcoder.program" => transcoder.and_then(|t| t.program.clone()),
        "transcoder.format" => transcoder.and_then(|t| t.format.clone()),
        "transcoder.quality" => transcoder.and_then(|t| t.quality).map(|q| q.to_string()),
        _ => None,
    }
}

fn transcoder_section(config: &mut AppConfig) -> &mut TranscoderConfig {
    config.transcoder.get_or_insert_with(TranscoderConfig::default)
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(invalid(key, "Value must not be empty"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_bool_value(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).map_err(|_| invalid(key, "Value must be 'true' or 'false'"))
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
