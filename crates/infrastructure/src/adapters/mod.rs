//! Provider port adapters
//!
//! Bridge the integration clients onto the application's `ProviderPort`
//! and assemble the provider registry from whichever credentials exist.

mod openweather_adapter;
mod weatherapi_adapter;

use std::sync::Arc;

use application::{WeatherError, ports::ProviderPort};
use domain::ProviderId;
use tracing::debug;

pub use openweather_adapter::OpenWeatherAdapter;
pub use weatherapi_adapter::WeatherApiAdapter;

use crate::config::AppConfig;

/// Build the adapter registry from configured credentials
///
/// Registration order is fixed: OpenWeatherMap first, WeatherAPI second.
/// A provider without a credential is simply left out; an empty registry is
/// legal (every fetch will then fail as unconfigured).
///
/// # Errors
///
/// Returns an error only when an HTTP client cannot be initialized.
pub fn build_provider_registry(
    config: &AppConfig,
) -> Result<Vec<(ProviderId, Arc<dyn ProviderPort>)>, WeatherError> {
    let mut registry: Vec<(ProviderId, Arc<dyn ProviderPort>)> = Vec::new();

    if let Some(client_config) = config.providers.openweather.to_client_config() {
        let adapter = OpenWeatherAdapter::new(client_config)?;
        registry.push((ProviderId::OpenWeather, Arc::new(adapter)));
        debug!(provider = %ProviderId::OpenWeather, "Registered weather provider");
    }

    if let Some(client_config) = config.providers.weatherapi.to_client_config() {
        let adapter = WeatherApiAdapter::new(client_config)?;
        registry.push((ProviderId::WeatherApi, Arc::new(adapter)));
        debug!(provider = %ProviderId::WeatherApi, "Registered weather provider");
    }

    Ok(registry)
}
