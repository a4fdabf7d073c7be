//! Application configuration
//!
//! Loaded once at startup from an optional `config.toml` merged with
//! `SKYCAST_*` environment variables. Provider credentials are optional:
//! a missing key removes that provider from availability, it is never a
//! startup failure.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub use ::config::ConfigError;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider credentials and endpoint overrides
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// City fetched on startup when the caller names none
    #[serde(default)]
    pub default_city: Option<String>,

    /// Cache store settings
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, ConfigError> {
        let builder = ::config::Config::builder()
            // Load from file if exists
            .add_source(::config::File::with_name("config").required(false))
            // Override with environment variables (e.g., SKYCAST_DEFAULT_CITY)
            .add_source(
                ::config::Environment::with_prefix("SKYCAST")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

/// Per-provider configuration sections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// OpenWeatherMap settings
    #[serde(default)]
    pub openweather: OpenWeatherAppConfig,

    /// WeatherAPI settings
    #[serde(default)]
    pub weatherapi: WeatherApiAppConfig,
}

/// OpenWeatherMap configuration section
#[derive(Clone, Serialize, Deserialize)]
pub struct OpenWeatherAppConfig {
    /// API key (sensitive - uses `SecretString`); absent means the
    /// provider is unavailable
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_openweather_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OpenWeatherAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherAppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for OpenWeatherAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openweather_base_url(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

impl OpenWeatherAppConfig {
    /// Convert to the integration client's configuration
    ///
    /// `None` when no credential is configured.
    #[must_use]
    pub fn to_client_config(&self) -> Option<integration_openweather::OpenWeatherConfig> {
        self.api_key
            .as_ref()
            .map(|key| integration_openweather::OpenWeatherConfig {
                api_key: key.expose_secret().to_string(),
                base_url: self.base_url.clone(),
                timeout_secs: self.timeout_secs,
            })
    }
}

/// WeatherAPI configuration section
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherApiAppConfig {
    /// API key (sensitive - uses `SecretString`); absent means the
    /// provider is unavailable
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_weatherapi_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for WeatherApiAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiAppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for WeatherApiAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weatherapi_base_url(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

impl WeatherApiAppConfig {
    /// Convert to the integration client's configuration
    ///
    /// `None` when no credential is configured.
    #[must_use]
    pub fn to_client_config(&self) -> Option<integration_weatherapi::WeatherApiConfig> {
        self.api_key
            .as_ref()
            .map(|key| integration_weatherapi::WeatherApiConfig {
                api_key: key.expose_secret().to_string(),
                base_url: self.base_url.clone(),
                timeout_secs: self.timeout_secs,
            })
    }
}

/// Cache store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Location of the cache database file
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}

fn default_openweather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weatherapi_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

const fn default_provider_timeout() -> u64 {
    10
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("skycast_cache.redb")
}
