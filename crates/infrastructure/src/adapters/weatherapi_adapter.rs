//! WeatherAPI adapter - Implements `ProviderPort` over the
//! `integration_weatherapi` client

use application::{WeatherError, ports::ProviderPort};
use async_trait::async_trait;
use domain::{CityQuery, TemperatureUnit, WeatherReport};
use integration_weatherapi::{WeatherApiClient, WeatherApiConfig, WeatherApiError};

/// Adapter for WeatherAPI.com
#[derive(Debug)]
pub struct WeatherApiAdapter {
    client: WeatherApiClient,
}

impl WeatherApiAdapter {
    /// Create an adapter over a configured client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherApiConfig) -> Result<Self, WeatherError> {
        let client = WeatherApiClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map integration errors into the application taxonomy
    fn map_error(err: WeatherApiError) -> WeatherError {
        match err {
            WeatherApiError::ConnectionFailed(message) => WeatherError::Transport(message),
            WeatherApiError::UpstreamRejected(message) => WeatherError::Upstream(message),
            WeatherApiError::ParseError(message) => WeatherError::Parse(message),
            WeatherApiError::InvalidDate(date) => {
                WeatherError::Parse(format!("invalid forecast date: {date}"))
            },
        }
    }
}

#[async_trait]
impl ProviderPort for WeatherApiAdapter {
    async fn fetch_weather(
        &self,
        city: &CityQuery,
        unit: TemperatureUnit,
    ) -> Result<WeatherReport, WeatherError> {
        self.client
            .fetch_weather(city, unit)
            .await
            .map_err(Self::map_error)
    }

    fn name(&self) -> &'static str {
        "WeatherAPI"
    }
}
