//! OpenWeatherMap adapter - Implements `ProviderPort` over the
//! `integration_openweather` client

use application::{WeatherError, ports::ProviderPort};
use async_trait::async_trait;
use domain::{CityQuery, TemperatureUnit, WeatherReport};
use integration_openweather::{OpenWeatherClient, OpenWeatherConfig, OpenWeatherError};

/// Adapter for OpenWeatherMap
#[derive(Debug)]
pub struct OpenWeatherAdapter {
    client: OpenWeatherClient,
}

impl OpenWeatherAdapter {
    /// Create an adapter over a configured client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, WeatherError> {
        let client = OpenWeatherClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map integration errors into the application taxonomy
    fn map_error(err: OpenWeatherError) -> WeatherError {
        match err {
            OpenWeatherError::ConnectionFailed(message) => WeatherError::Transport(message),
            OpenWeatherError::UpstreamRejected(message) => WeatherError::Upstream(message),
            OpenWeatherError::ParseError(message) => WeatherError::Parse(message),
        }
    }
}

#[async_trait]
impl ProviderPort for OpenWeatherAdapter {
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
        "OpenWeatherMap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_adapter() {
        let adapter = OpenWeatherAdapter::new(OpenWeatherConfig::new("key"));
        assert!(adapter.is_ok());
    }

    #[test]
    fn name_is_the_fixed_label() {
        let adapter = OpenWeatherAdapter::new(OpenWeatherConfig::new("key")).unwrap();
        assert_eq!(adapter.name(), "OpenWeatherMap");
    }

    #[test]
    fn map_error_keeps_categories_apart() {
        assert_eq!(
            OpenWeatherAdapter::map_error(OpenWeatherError::ConnectionFailed("dns".into())),
            WeatherError::Transport("dns".to_string())
        );
        assert_eq!(
            OpenWeatherAdapter::map_error(OpenWeatherError::UpstreamRejected(
                "city not found".into()
            )),
            WeatherError::Upstream("city not found".to_string())
        );
        assert_eq!(
            OpenWeatherAdapter::map_error(OpenWeatherError::ParseError("eof".into())),
            WeatherError::Parse("eof".to_string())
        );
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OpenWeatherAdapter>();
    }
}
