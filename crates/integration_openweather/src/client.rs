//! OpenWeatherMap client
//!
//! HTTP client for the paired `/weather` and `/forecast` endpoints.

use domain::{CityQuery, TemperatureUnit, WeatherObservation, WeatherReport};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    CurrentResponse, ErrorBody, ForecastResponse, collapse_forecast, primary_condition,
    round_whole,
};

/// Fallback when a failure response carries no parseable message
const GENERIC_FETCH_ERROR: &str = "Failed to fetch weather data";

/// OpenWeatherMap client errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OpenWeatherError {
    /// Transport failed before any response arrived
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Upstream answered with a failure status; message is the upstream's
    /// own when it sent one
    #[error("{0}")]
    UpstreamRejected(String),

    /// A success response whose body could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// OpenWeatherMap client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// API key for all requests
    pub api_key: String,

    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl OpenWeatherConfig {
    /// Configuration with defaults for everything but the key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// OpenWeatherMap HTTP client
///
/// One logical fetch issues the `/weather` and `/forecast` requests
/// concurrently and requires both to succeed; a partial success is a
/// failure.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, OpenWeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OpenWeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch current conditions and the 5-day forecast for a city
    #[instrument(skip(self), fields(city = %city, unit = %unit))]
    pub async fn fetch_weather(
        &self,
        city: &CityQuery,
        unit: TemperatureUnit,
    ) -> Result<WeatherReport, OpenWeatherError> {
        let current_url = format!("{}/weather", self.config.base_url);
        let forecast_url = format!("{}/forecast", self.config.base_url);

        // Fixed fan-out/fan-in: both requests in flight together, either
        // failure fails the whole fetch.
        let (current, forecast) = tokio::try_join!(
            self.get_json::<CurrentResponse>(&current_url, city, unit),
            self.get_json::<ForecastResponse>(&forecast_url, city, unit),
        )?;

        debug!(
            city = %current.name,
            slices = forecast.list.len(),
            "Fetched OpenWeather current + forecast"
        );

        Ok(Self::build_report(&current, &forecast))
    }

    /// Native unit selector for the `units` query parameter
    const fn unit_param(unit: TemperatureUnit) -> &'static str {
        match unit {
            TemperatureUnit::Celsius => "metric",
            TemperatureUnit::Fahrenheit => "imperial",
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        city: &CityQuery,
        unit: TemperatureUnit,
    ) -> Result<T, OpenWeatherError> {
        let response = self
            .client
            .get(url)
            .query(&[
                ("q", city.as_str()),
                ("units", Self::unit_param(unit)),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| OpenWeatherError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string());
            debug!(status = %status, "OpenWeather request rejected");
            return Err(OpenWeatherError::UpstreamRejected(message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| OpenWeatherError::ParseError(e.to_string()))
    }

    fn build_report(current: &CurrentResponse, forecast: &ForecastResponse) -> WeatherReport {
        let (condition, description, icon) = primary_condition(&current.weather);

        let observation = WeatherObservation {
            city: current.name.clone(),
            country: current.sys.country.clone(),
            temperature: round_whole(current.main.temp),
            feels_like: round_whole(current.main.feels_like),
            condition,
            description,
            humidity: current.main.humidity,
            wind_speed: round_whole(current.wind.speed),
            pressure: round_whole(current.main.pressure),
            icon,
            observed_at: chrono::DateTime::from_timestamp(current.dt, 0).unwrap_or_default(),
        };

        WeatherReport::new(observation, collapse_forecast(&forecast.list))
    }
}
