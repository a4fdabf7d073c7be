//! OpenWeatherMap wire models and normalization
//!
//! Deserialization targets for the `/weather` and `/forecast` endpoints,
//! plus the mapping from OpenWeather's condition vocabulary onto the
//! canonical categories and the 3-hour-slice collapse into daily entries.

use std::collections::btree_map::{BTreeMap, Entry};

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use domain::{CanonicalCondition, ForecastDay, MAX_FORECAST_DAYS};
use serde::Deserialize;

/// `/weather` response (the fields this crate consumes)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CurrentResponse {
    pub name: String,
    #[serde(default)]
    pub sys: Sys,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    pub wind: Wind,
    pub dt: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Sys {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConditionEntry {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Wind {
    pub speed: f64,
}

/// `/forecast` response: 3-hour slices, typically 40 of them
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastResponse {
    pub list: Vec<ForecastSlice>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastSlice {
    pub dt: i64,
    pub main: SliceReadings,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    #[serde(default)]
    pub pop: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SliceReadings {
    pub temp_max: f64,
    pub temp_min: f64,
}

/// Error body shape OpenWeather uses for non-success responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Round to the nearest whole number for display consistency
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn round_whole(value: f64) -> i32 {
    value.round() as i32
}

/// Map OpenWeather's condition group onto a canonical category
///
/// Case-insensitive substring matching; total, defaulting to `Clear` when
/// nothing matches.
#[must_use]
pub fn normalize_condition(input: &str) -> CanonicalCondition {
    let normalized = input.to_lowercase();
    if normalized.contains("clear") {
        CanonicalCondition::Clear
    } else if normalized.contains("cloud") {
        CanonicalCondition::Clouds
    } else if normalized.contains("rain") {
        CanonicalCondition::Rain
    } else if normalized.contains("drizzle") {
        CanonicalCondition::Drizzle
    } else if normalized.contains("thunder") {
        CanonicalCondition::Thunderstorm
    } else if normalized.contains("snow") {
        CanonicalCondition::Snow
    } else if normalized.contains("mist") {
        CanonicalCondition::Mist
    } else if normalized.contains("fog") {
        CanonicalCondition::Fog
    } else if normalized.contains("haze") {
        CanonicalCondition::Haze
    } else if normalized.contains("dust") {
        CanonicalCondition::Dust
    } else if normalized.contains("sand") {
        CanonicalCondition::Sand
    } else if normalized.contains("smoke") {
        CanonicalCondition::Smoke
    } else {
        CanonicalCondition::Clear
    }
}

/// The leading condition entry, or neutral defaults when the array is empty
pub(crate) fn primary_condition(entries: &[ConditionEntry]) -> (CanonicalCondition, String, String) {
    entries.first().map_or_else(
        || (CanonicalCondition::Clear, String::new(), String::new()),
        |entry| {
            (
                normalize_condition(&entry.main),
                entry.description.clone(),
                entry.icon.clone(),
            )
        },
    )
}

/// Collapse 3-hour slices into at most five daily entries
///
/// One entry per UTC calendar date, represented by the slice whose hour is
/// closest to 12:00 (the earlier slice wins a tie), first five distinct
/// dates in ascending order.
pub(crate) fn collapse_forecast(slices: &[ForecastSlice]) -> Vec<ForecastDay> {
    const NOON_HOUR: i64 = 12;

    let mut best_per_date: BTreeMap<NaiveDate, (i64, &ForecastSlice)> = BTreeMap::new();
    for slice in slices {
        let Some(when) = DateTime::<Utc>::from_timestamp(slice.dt, 0) else {
            continue;
        };
        let distance = (i64::from(when.hour()) - NOON_HOUR).abs();
        match best_per_date.entry(when.date_naive()) {
            Entry::Vacant(vacant) => {
                vacant.insert((distance, slice));
            },
            Entry::Occupied(mut occupied) => {
                if distance < occupied.get().0 {
                    occupied.insert((distance, slice));
                }
            },
        }
    }

    best_per_date
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(date, (_, slice))| {
            let (condition, description, icon) = primary_condition(&slice.weather);
            ForecastDay {
                date,
                temp_max: round_whole(slice.main.temp_max),
                temp_min: round_whole(slice.main.temp_min),
                condition,
                description,
                icon,
                precipitation_chance: slice
                    .pop
                    .map(|probability| round_whole((probability * 100.0).clamp(0.0, 100.0)) as u8),
            }
        })
        .collect()
}
