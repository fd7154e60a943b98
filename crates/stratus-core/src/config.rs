//! Process configuration.
//!
//! Everything Stratus needs at startup comes from the environment: the
//! OpenWeatherMap credential, an optional provider base URL override
//! (integration tests point this at a local mock), and the database path.

use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Default OpenWeatherMap endpoint root.
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";

/// Default SQLite database path, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "stratus.db";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("Invalid setting {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeatherMap API credential, sent as the `appid` query parameter.
    pub api_key: String,

    /// Provider base URL; geocoding, weather and air-pollution paths are
    /// joined onto this.
    pub base_url: Url,

    /// Path of the SQLite database file.
    pub database_path: PathBuf,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingSetting` if `OPENWEATHER_API_KEY` is
    /// unset or blank, and `ConfigError::Invalid` if
    /// `OPENWEATHER_BASE_URL` does not parse as a URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingSetting("OPENWEATHER_API_KEY"))?;

        let base_url = match std::env::var("OPENWEATHER_BASE_URL") {
            Ok(raw) => Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                field: "OPENWEATHER_BASE_URL",
                message: e.to_string(),
            })?,
            Err(_) => default_base_url(),
        };

        let database_path = std::env::var("STRATUS_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATABASE_PATH));

        Ok(Self {
            api_key,
            base_url,
            database_path,
        })
    }
}

// The literal is a valid URL; parsing cannot fail.
#[allow(clippy::unwrap_used)]
fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).unwrap()
}
