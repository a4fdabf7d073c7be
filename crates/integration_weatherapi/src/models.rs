//! WeatherAPI wire models and normalization
//!
//! Deserialization targets for `forecast.json` and the mapping from
//! WeatherAPI's numeric condition codes onto the canonical categories.

use domain::CanonicalCondition;
use serde::Deserialize;

/// `forecast.json` response (the fields this crate consumes)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastJsonResponse {
    pub location: Location,
    pub current: Current,
    pub forecast: ForecastBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Location {
    pub name: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Current {
    pub temp_c: f64,
    pub temp_f: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub condition: ConditionBlock,
    pub humidity: u8,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub pressure_mb: f64,
    pub last_updated_epoch: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConditionBlock {
    pub text: String,
    #[serde(default)]
    pub icon: String,
    pub code: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastBlock {
    #[serde(rename = "forecastday", default)]
    pub forecast_day: Vec<ForecastDayEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastDayEntry {
    pub date: String,
    pub day: DaySummary,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DaySummary {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub condition: ConditionBlock,
    #[serde(default)]
    pub daily_chance_of_rain: u8,
    #[serde(default)]
    pub daily_chance_of_snow: u8,
}

/// Error body shape WeatherAPI uses for non-success responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

/// Round to the nearest whole number for display consistency
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn round_whole(value: f64) -> i32 {
    value.round() as i32
}

/// Condition codes that mean cloud cover
const CLOUD_CODES: [i32; 3] = [1003, 1006, 1009];
/// Condition codes that mean rain of some intensity
const RAIN_CODES: [i32; 10] = [1063, 1180, 1183, 1186, 1189, 1192, 1195, 1240, 1243, 1246];
/// Condition codes that mean drizzle
const DRIZZLE_CODES: [i32; 4] = [1150, 1153, 1168, 1171];
/// Condition codes that mean thunder
const THUNDER_CODES: [i32; 5] = [1087, 1273, 1276, 1279, 1282];
/// Condition codes that mean snow, sleet, or ice
const SNOW_CODES: [i32; 13] = [
    1066, 1114, 1210, 1213, 1216, 1219, 1222, 1225, 1237, 1255, 1258, 1261, 1264,
];

/// Map a WeatherAPI condition onto a canonical category
///
/// Numeric code lookup first, then a substring pass over the text for the
/// categories WeatherAPI has no dedicated codes for. Total, defaulting to
/// `Clear`.
#[must_use]
pub fn normalize_condition(text: &str, code: i32) -> CanonicalCondition {
    if code == 1000 {
        return CanonicalCondition::Clear;
    }
    if CLOUD_CODES.contains(&code) {
        return CanonicalCondition::Clouds;
    }
    if RAIN_CODES.contains(&code) {
        return CanonicalCondition::Rain;
    }
    if DRIZZLE_CODES.contains(&code) {
        return CanonicalCondition::Drizzle;
    }
    if THUNDER_CODES.contains(&code) {
        return CanonicalCondition::Thunderstorm;
    }
    if SNOW_CODES.contains(&code) {
        return CanonicalCondition::Snow;
    }
    if code == 1030 {
        return CanonicalCondition::Mist;
    }
    if code == 1135 || code == 1147 {
        return CanonicalCondition::Fog;
    }

    let normalized = text.to_lowercase();
    if normalized.contains("haze") {
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

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn code_tables_cover_the_main_categories() {
        assert_eq!(normalize_condition("Sunny", 1000), CanonicalCondition::Clear);
        assert_eq!(
            normalize_condition("Partly cloudy", 1003),
            CanonicalCondition::Clouds
        );
        assert_eq!(
            normalize_condition("Overcast", 1009),
            CanonicalCondition::Clouds
        );
        assert_eq!(
            normalize_condition("Light rain", 1183),
            CanonicalCondition::Rain
        );
        assert_eq!(
            normalize_condition("Torrential rain shower", 1246),
            CanonicalCondition::Rain
        );
        assert_eq!(
            normalize_condition("Patchy light drizzle", 1150),
            CanonicalCondition::Drizzle
        );
        assert_eq!(
            normalize_condition("Thundery outbreaks possible", 1087),
            CanonicalCondition::Thunderstorm
        );
        assert_eq!(
            normalize_condition("Patchy snow possible", 1066),
            CanonicalCondition::Snow
        );
        assert_eq!(
            normalize_condition("Ice pellets", 1237),
            CanonicalCondition::Snow
        );
        assert_eq!(normalize_condition("Mist", 1030), CanonicalCondition::Mist);
        assert_eq!(normalize_condition("Fog", 1135), CanonicalCondition::Fog);
        assert_eq!(
            normalize_condition("Freezing fog", 1147),
            CanonicalCondition::Fog
        );
    }

    #[test]
    fn text_fallback_handles_categories_without_codes() {
        assert_eq!(normalize_condition("Haze", 9999), CanonicalCondition::Haze);
        assert_eq!(
            normalize_condition("Blowing dust", 9999),
            CanonicalCondition::Dust
        );
        assert_eq!(
            normalize_condition("Sandstorm", 9999),
            CanonicalCondition::Sand
        );
        assert_eq!(normalize_condition("Smoke", 9999), CanonicalCondition::Smoke);
    }

    #[test]
    fn code_wins_over_text() {
        // A rain code with hazy text is still rain
        assert_eq!(
            normalize_condition("hazy rain", 1183),
            CanonicalCondition::Rain
        );
    }

    #[test]
    fn unrecognized_input_defaults_to_clear() {
        assert_eq!(normalize_condition("Blizzard?", 42), CanonicalCondition::Clear);
        assert_eq!(normalize_condition("", 0), CanonicalCondition::Clear);
    }

    proptest! {
        #[test]
        fn normalization_is_total(text in ".*", code in proptest::num::i32::ANY) {
            let condition = normalize_condition(&text, code);
            prop_assert!(CanonicalCondition::ALL.contains(&condition));
        }
    }

    #[test]
    fn rounding_goes_to_the_nearest_whole_number() {
        assert_eq!(round_whole(12.5), 13);
        assert_eq!(round_whole(12.49), 12);
        assert_eq!(round_whole(-0.5), -1);
    }
}
