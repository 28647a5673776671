//! Process configuration.
//!
//! Credentials come from the environment. Tunables can also be given in an
//! optional TOML file; the environment wins over the file.
//!
//! ```toml
//! endpoint = "https://practicum.yandex.ru/api/user_api/homework_statuses/"
//! retry_period = "10m"
//! request_timeout = "10s"
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};

use crate::api::DEFAULT_ENDPOINT;
use crate::duration::parse_duration;
use crate::error::ConfigError;
use crate::notify::DEFAULT_API_URL;

/// Credentials that must be present before polling starts, with the
/// environment variable each one is read from.
const REQUIRED: [(&str, &str); 3] = [
    ("practicum_token", "PRACTICUM_TOKEN"),
    ("telegram_token", "TELEGRAM_TOKEN"),
    ("telegram_chat_id", "TELEGRAM_CHAT_ID"),
];

/// Default pause between poll cycles.
pub const DEFAULT_RETRY_PERIOD: &str = "600s";

/// Default timeout for every outbound request.
pub const DEFAULT_REQUEST_TIMEOUT: &str = "10s";

/// Settings built once at startup and handed to the client and notifier.
#[derive(Clone)]
pub struct Settings {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_period: Duration,
    pub request_timeout: Duration,
}

impl Settings {
    /// Load settings from an optional file and the process environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = defaults()?;
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder.add_source(Environment::default()).build()?;
        Self::from_config(&config)
    }

    /// Extract settings from an already-built [`Config`].
    ///
    /// Every missing credential is reported at once.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let lookup = |key: &str| {
            config
                .get_string(key)
                .ok()
                .filter(|value| !value.trim().is_empty())
        };

        let missing: Vec<String> = REQUIRED
            .iter()
            .filter(|&&(key, _)| lookup(key).is_none())
            .map(|(_, env_name)| env_name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(Settings {
            practicum_token: lookup("practicum_token").unwrap_or_default(),
            telegram_token: lookup("telegram_token").unwrap_or_default(),
            telegram_chat_id: lookup("telegram_chat_id").unwrap_or_default(),
            endpoint: config.get_string("endpoint")?,
            telegram_api_url: config.get_string("telegram_api_url")?,
            retry_period: duration_setting(config, "retry_period")?,
            request_timeout: duration_setting(config, "request_timeout")?,
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// A builder pre-loaded with the defaults for every optional key.
pub fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("endpoint", DEFAULT_ENDPOINT)?
        .set_default("telegram_api_url", DEFAULT_API_URL)?
        .set_default("retry_period", DEFAULT_RETRY_PERIOD)?
        .set_default("request_timeout", DEFAULT_REQUEST_TIMEOUT)?)
}

/// Parse a duration key. Zero is rejected along with unparsable values.
fn duration_setting(config: &Config, key: &str) -> Result<Duration, ConfigError> {
    let value = config.get_string(key)?;
    match parse_duration(&value) {
        Ok(duration) if !duration.is_zero() => Ok(duration),
        _ => Err(ConfigError::InvalidDuration {
            key: key.to_string(),
            value,
        }),
    }
}
