//! WeatherAPI client
//!
//! HTTP client for the combined `forecast.json` endpoint.

use domain::{CityQuery, ForecastDay, TemperatureUnit, WeatherObservation, WeatherReport};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    DaySummary, ErrorBody, ForecastDayEntry, ForecastJsonResponse, normalize_condition,
    round_whole,
};

/// Fallback when a failure response carries no parseable message
const GENERIC_FETCH_ERROR: &str = "Failed to fetch weather data";

/// Forecast days requested from the API
const FORECAST_DAYS: u8 = 5;

/// WeatherAPI client errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherApiError {
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

    /// A success response with an unparseable forecast date
    #[error("Invalid date in response: {0}")]
    InvalidDate(String),
}

/// WeatherAPI client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// API key for all requests
    pub api_key: String,

    /// API base URL (default: <https://api.weatherapi.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl WeatherApiConfig {
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

/// WeatherAPI HTTP client
///
/// Current conditions and the daily forecast arrive in one response; the
/// requested unit system picks between the parallel `_c`/`_f` and
/// `_kph`/`_mph` field pairs, with no conversion.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    config: WeatherApiConfig,
}

impl WeatherApiClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherApiConfig) -> Result<Self, WeatherApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherApiError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch current conditions and the 5-day forecast for a city
    #[instrument(skip(self), fields(city = %city, unit = %unit))]
    pub async fn fetch_weather(
        &self,
        city: &CityQuery,
        unit: TemperatureUnit,
    ) -> Result<WeatherReport, WeatherApiError> {
        let url = format!("{}/forecast.json", self.config.base_url);
        let days = FORECAST_DAYS.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("q", city.as_str()),
                ("days", days.as_str()),
                ("aqi", "no"),
            ])
            .send()
            .await
            .map_err(|e| WeatherApiError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|detail| detail.message)
                .unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string());
            debug!(status = %status, "WeatherAPI request rejected");
            return Err(WeatherApiError::UpstreamRejected(message));
        }

        let data: ForecastJsonResponse = response
            .json()
            .await
            .map_err(|e| WeatherApiError::ParseError(e.to_string()))?;

        debug!(
            city = %data.location.name,
            days = data.forecast.forecast_day.len(),
            "Fetched WeatherAPI forecast"
        );

        Self::build_report(&data, unit)
    }

    fn build_report(
        data: &ForecastJsonResponse,
        unit: TemperatureUnit,
    ) -> Result<WeatherReport, WeatherApiError> {
        let current = &data.current;
        let (temperature, feels_like, wind_speed) = match unit {
            TemperatureUnit::Celsius => (current.temp_c, current.feelslike_c, current.wind_kph),
            TemperatureUnit::Fahrenheit => (current.temp_f, current.feelslike_f, current.wind_mph),
        };

        let observation = WeatherObservation {
            city: data.location.name.clone(),
            country: data.location.country.clone(),
            temperature: round_whole(temperature),
            feels_like: round_whole(feels_like),
            condition: normalize_condition(&current.condition.text, current.condition.code),
            description: current.condition.text.clone(),
            humidity: current.humidity,
            wind_speed: round_whole(wind_speed),
            pressure: round_whole(current.pressure_mb),
            icon: current.condition.icon.clone(),
            observed_at: chrono::DateTime::from_timestamp(current.last_updated_epoch, 0)
                .unwrap_or_default(),
        };

        let forecast = data
            .forecast
            .forecast_day
            .iter()
            .map(|entry| Self::build_day(entry, unit))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WeatherReport::new(observation, forecast))
    }

    fn build_day(
        entry: &ForecastDayEntry,
        unit: TemperatureUnit,
    ) -> Result<ForecastDay, WeatherApiError> {
        let date = entry
            .date
            .parse()
            .map_err(|_| WeatherApiError::InvalidDate(entry.date.clone()))?;
        let day: &DaySummary = &entry.day;
        let (temp_max, temp_min) = match unit {
            TemperatureUnit::Celsius => (day.maxtemp_c, day.mintemp_c),
            TemperatureUnit::Fahrenheit => (day.maxtemp_f, day.mintemp_f),
        };

        Ok(ForecastDay {
            date,
            temp_max: round_whole(temp_max),
            temp_min: round_whole(temp_min),
            condition: normalize_condition(&day.condition.text, day.condition.code),
            description: day.condition.text.clone(),
            icon: day.condition.icon.clone(),
            precipitation_chance: Some(day.daily_chance_of_rain.max(day.daily_chance_of_snow)),
        })
    }
}
