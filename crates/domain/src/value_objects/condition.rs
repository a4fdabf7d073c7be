//! Canonical weather condition

use serde::{Deserialize, Serialize};

/// Canonical weather condition category
///
/// Every provider-specific weather code or text is normalized onto exactly
/// one of these twelve categories. Providers that cannot be mapped fall back
/// to [`CanonicalCondition::Clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalCondition {
    /// Clear sky
    Clear,
    /// Cloud cover of any density
    Clouds,
    /// Rain of any intensity
    Rain,
    /// Light drizzle
    Drizzle,
    /// Thunderstorm
    Thunderstorm,
    /// Snow, sleet, or ice
    Snow,
    /// Mist
    Mist,
    /// Fog
    Fog,
    /// Haze
    Haze,
    /// Airborne dust
    Dust,
    /// Blowing sand
    Sand,
    /// Smoke
    Smoke,
}

impl CanonicalCondition {
    /// All categories, in declaration order
    pub const ALL: [Self; 12] = [
        Self::Clear,
        Self::Clouds,
        Self::Rain,
        Self::Drizzle,
        Self::Thunderstorm,
        Self::Snow,
        Self::Mist,
        Self::Fog,
        Self::Haze,
        Self::Dust,
        Self::Sand,
        Self::Smoke,
    ];

    /// Get a human-readable description of the condition
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::Clouds => "Cloudy",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Fog => "Fog",
            Self::Haze => "Haze",
            Self::Dust => "Dust",
            Self::Sand => "Sand",
            Self::Smoke => "Smoke",
        }
    }

    /// Get an emoji representation of the condition
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::Clouds => "☁️",
            Self::Rain => "🌧️",
            Self::Drizzle => "🌦️",
            Self::Thunderstorm => "⛈️",
            Self::Snow => "❄️",
            Self::Mist | Self::Fog | Self::Haze => "🌫️",
            Self::Dust | Self::Sand => "🌪️",
            Self::Smoke => "💨",
        }
    }
}

impl std::fmt::Display for CanonicalCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
