//! Temperature unit selection

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Requested unit system for temperatures and wind speeds
///
/// The unit is fixed at fetch time: providers return pre-converted values
/// and no post-conversion happens, so results for different units live under
/// different cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Metric: °C, km/h
    #[default]
    Celsius,
    /// Imperial: °F, mph
    Fahrenheit,
}

impl TemperatureUnit {
    /// Stable identifier used in cache keys and configuration
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    /// Degree symbol for display
    #[must_use]
    pub const fn degree_symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    /// Wind speed unit label for display
    #[must_use]
    pub const fn speed_symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "km/h",
            Self::Fahrenheit => "mph",
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TemperatureUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "celsius" | "c" | "metric" => Ok(Self::Celsius),
            "fahrenheit" | "f" | "imperial" => Ok(Self::Fahrenheit),
            other => Err(DomainError::UnknownUnit(other.to_string())),
        }
    }
}
