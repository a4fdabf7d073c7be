//! Normalized weather report
//!
//! The single internal shape all provider responses are reconciled into:
//! one point-in-time observation plus up to five daily outlooks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::CanonicalCondition;

/// Maximum number of forecast days in a report
pub const MAX_FORECAST_DAYS: usize = 5;

/// A point-in-time snapshot of current conditions
///
/// Immutable once constructed. Temperatures, wind speed, and pressure are
/// whole numbers in the unit system requested at fetch time; adapters round
/// before constructing this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// City name as returned by the provider (its casing, not the query's)
    pub city: String,
    /// ISO country code or country name, per provider
    pub country: String,
    /// Temperature, rounded
    pub temperature: i32,
    /// Feels-like temperature, rounded
    pub feels_like: i32,
    /// Canonical condition category
    pub condition: CanonicalCondition,
    /// Provider's free-text description of the condition
    pub description: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed, rounded
    pub wind_speed: i32,
    /// Pressure in hPa, rounded
    pub pressure: i32,
    /// Provider-specific icon reference
    pub icon: String,
    /// Observation time (Unix seconds on the wire)
    #[serde(with = "chrono::serde::ts_seconds")]
    pub observed_at: DateTime<Utc>,
}

/// A single future day's outlook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date of the forecast
    pub date: NaiveDate,
    /// Maximum temperature, rounded
    pub temp_max: i32,
    /// Minimum temperature, rounded
    pub temp_min: i32,
    /// Canonical condition category
    pub condition: CanonicalCondition,
    /// Provider's free-text description
    pub description: String,
    /// Provider-specific icon reference
    pub icon: String,
    /// Precipitation probability percentage (0-100), absent when the
    /// provider does not supply one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_chance: Option<u8>,
}

/// Aggregate of current conditions and the multi-day forecast
///
/// The forecast is ordered by ascending date, holds at most one entry per
/// calendar date, and never exceeds [`MAX_FORECAST_DAYS`] entries. The
/// constructor enforces this, so a `WeatherReport` cannot exist in a shape
/// that violates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Current conditions
    pub current: WeatherObservation,
    /// Daily forecast, ascending by date
    pub forecast: Vec<ForecastDay>,
}

impl WeatherReport {
    /// Build a report, shaping the forecast to the invariant: sorted
    /// ascending by date, one entry per date (first occurrence wins),
    /// capped at [`MAX_FORECAST_DAYS`].
    #[must_use]
    pub fn new(current: WeatherObservation, mut forecast: Vec<ForecastDay>) -> Self {
        forecast.sort_by_key(|day| day.date);
        forecast.dedup_by_key(|day| day.date);
        forecast.truncate(MAX_FORECAST_DAYS);
        Self { current, forecast }
    }
}
