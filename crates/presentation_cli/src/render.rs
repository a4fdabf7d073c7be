//! Plain-text rendering of weather reports

use domain::{TemperatureUnit, WeatherReport};

/// Render a report as a small text dashboard
pub fn render_report(report: &WeatherReport, unit: TemperatureUnit) -> String {
    let current = &report.current;
    let degrees = unit.degree_symbol();

    let mut out = format!(
        "{}, {} — {} {}\n  {}{degrees} (feels like {}{degrees})  {}\n  humidity {}% · wind {} {} · pressure {} hPa\n",
        current.city,
        current.country,
        current.condition.description(),
        current.condition.emoji(),
        current.temperature,
        current.feels_like,
        current.description,
        current.humidity,
        current.wind_speed,
        unit.speed_symbol(),
        current.pressure,
    );

    if !report.forecast.is_empty() {
        out.push_str("\nForecast:\n");
        for day in &report.forecast {
            let chance = day
                .precipitation_chance
                .map(|p| format!("  ({p}% precip)"))
                .unwrap_or_default();
            out.push_str(&format!(
                "  {}  {} {}/{}{degrees}  {}{chance}\n",
                day.date,
                day.condition.emoji(),
                day.temp_max,
                day.temp_min,
                day.description,
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use domain::{CanonicalCondition, ForecastDay, WeatherObservation};

    use super::*;

    fn report() -> WeatherReport {
        WeatherReport::new(
            WeatherObservation {
                city: "London".to_string(),
                country: "GB".to_string(),
                temperature: 18,
                feels_like: 17,
                condition: CanonicalCondition::Clouds,
                description: "scattered clouds".to_string(),
                humidity: 72,
                wind_speed: 14,
                pressure: 1012,
                icon: "03d".to_string(),
                observed_at: DateTime::from_timestamp(1_786_104_000, 0).unwrap(),
            },
            vec![
                ForecastDay {
                    date: "2026-08-07".parse().unwrap(),
                    temp_max: 21,
                    temp_min: 13,
                    condition: CanonicalCondition::Rain,
                    description: "light rain".to_string(),
                    icon: "10d".to_string(),
                    precipitation_chance: Some(40),
                },
                ForecastDay {
                    date: "2026-08-08".parse().unwrap(),
                    temp_max: 23,
                    temp_min: 14,
                    condition: CanonicalCondition::Clear,
                    description: "clear sky".to_string(),
                    icon: "01d".to_string(),
                    precipitation_chance: None,
                },
            ],
        )
    }

    #[test]
    fn renders_current_conditions_with_unit_symbols() {
        let text = render_report(&report(), TemperatureUnit::Celsius);
        assert!(text.contains("London, GB"));
        assert!(text.contains("18°C (feels like 17°C)"));
        assert!(text.contains("wind 14 km/h"));
        assert!(text.contains("pressure 1012 hPa"));
    }

    #[test]
    fn renders_forecast_lines_with_optional_precipitation() {
        let text = render_report(&report(), TemperatureUnit::Celsius);
        assert!(text.contains("2026-08-07"));
        assert!(text.contains("(40% precip)"));
        // The day without a chance has no precip suffix on its line
        let second_day = text.lines().find(|l| l.contains("2026-08-08")).unwrap();
        assert!(!second_day.contains("precip"));
    }

    #[test]
    fn fahrenheit_switches_the_symbols() {
        let text = render_report(&report(), TemperatureUnit::Fahrenheit);
        assert!(text.contains("°F"));
        assert!(text.contains("mph"));
    }

    #[test]
    fn empty_forecast_omits_the_section() {
        let mut bare = report();
        bare.forecast.clear();
        let text = render_report(&bare, TemperatureUnit::Celsius);
        assert!(!text.contains("Forecast:"));
    }
}
