use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

const CONNECTION_STRING_VAR: &str = "EVENT_HUB_CONNECTION_STRING";
const EVENT_HUB_NAME_VAR: &str = "EVENT_HUB_NAME";

/// Seconds between two emitted readings. Change in source; there is no flag for it.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Connection settings for the emitter, built once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    pub connection_string: String,
    pub event_hub_name: String,
    pub interval: Duration,
}

impl EmitterConfig {
    /// Loads the configuration from `EVENT_HUB_CONNECTION_STRING` and `EVENT_HUB_NAME`.
    ///
    /// Returns `Error::MissingConfiguration` if either variable is unset or empty,
    /// so the process can fail before any record is generated.
    pub fn from_env() -> Result<EmitterConfig> {
        EmitterConfig::from_values(env::var(CONNECTION_STRING_VAR).ok(), env::var(EVENT_HUB_NAME_VAR).ok(), DEFAULT_INTERVAL)
    }

    /// Validates raw configuration values. Empty strings count as absent.
    pub fn from_values(connection_string: Option<String>, event_hub_name: Option<String>, interval: Duration) -> Result<EmitterConfig> {
        let connection_string = connection_string.filter(|s| !s.is_empty());
        let event_hub_name = event_hub_name.filter(|s| !s.is_empty());

        match (connection_string, event_hub_name) {
            (Some(connection_string), Some(event_hub_name)) => Ok(EmitterConfig { connection_string, event_hub_name, interval }),
            _ => Err(Error::MissingConfiguration(format!(
                "Please set the environment variables '{}' and '{}'",
                CONNECTION_STRING_VAR, EVENT_HUB_NAME_VAR
            ))),
        }
    }
}
