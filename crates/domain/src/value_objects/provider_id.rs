//! Provider identifier

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Stable identifier for a configured weather provider
///
/// The set is closed: adding a provider means adding a variant here and an
/// adapter for it. The `as_str` form is what appears in cache keys,
/// configuration, and the consumer-facing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    /// OpenWeatherMap (current + 3-hourly forecast endpoints)
    #[serde(rename = "openweather")]
    OpenWeather,
    /// WeatherAPI.com (combined forecast endpoint)
    #[serde(rename = "weatherapi")]
    WeatherApi,
}

impl ProviderId {
    /// Stable identifier used in cache keys and configuration
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenWeather => "openweather",
            Self::WeatherApi => "weatherapi",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openweather" => Ok(Self::OpenWeather),
            "weatherapi" => Ok(Self::WeatherApi),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_round_trips_through_from_str() {
        for provider in [ProviderId::OpenWeather, ProviderId::WeatherApi] {
            assert_eq!(provider.as_str().parse::<ProviderId>().unwrap(), provider);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "OpenWeather".parse::<ProviderId>().unwrap(),
            ProviderId::OpenWeather
        );
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = "acme".parse::<ProviderId>().unwrap_err();
        assert_eq!(err, DomainError::UnknownProvider("acme".to_string()));
    }

    #[test]
    fn serde_uses_id_string() {
        assert_eq!(
            serde_json::to_string(&ProviderId::OpenWeather).unwrap(),
            "\"openweather\""
        );
        let parsed: ProviderId = serde_json::from_str("\"weatherapi\"").unwrap();
        assert_eq!(parsed, ProviderId::WeatherApi);
    }
}
