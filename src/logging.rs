//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Env var consulted when `RUST_LOG` is unset
pub const LOG_ENV: &str = "AUDIO_DEPOT_LOG";

/// Install the global subscriber.
///
/// Filter precedence: `RUST_LOG`, then `AUDIO_DEPOT_LOG`, then `default_level`.
/// Logs go to stderr so stdout stays free for command output.
pub fn init(default_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    // A second init (e.g. from tests) is harmless
    let _ = if json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
}
