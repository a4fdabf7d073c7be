//! Provider adapter port
//!
//! One implementation per upstream weather service. An adapter owns the
//! wire schema of its provider and hands back the normalized report.

use async_trait::async_trait;
use domain::{CityQuery, TemperatureUnit, WeatherReport};
#[cfg(test)]
use mockall::automock;

use crate::error::WeatherError;

/// Port for a single weather provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProviderPort: Send + Sync {
    /// Fetch current conditions and the multi-day forecast for a city
    ///
    /// Values come back in the provider's native fields for the requested
    /// unit system; no conversion happens downstream of the adapter.
    async fn fetch_weather(
        &self,
        city: &CityQuery,
        unit: TemperatureUnit,
    ) -> Result<WeatherReport, WeatherError>;

    /// Fixed human-readable label for the provider. No side effects.
    fn name(&self) -> &'static str;
}
