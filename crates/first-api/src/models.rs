//! First API data models.

use chrono::{Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Weather condition summaries the forecast picks from.
pub const FORECAST_SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Number of days a forecast covers.
pub const FORECAST_DAYS: i64 = 5;

/// A single day's weather forecast.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherForecast {
    /// The day this forecast applies to.
    pub date: NaiveDate,

    /// Temperature in degrees Celsius.
    pub temperature_c: i32,

    /// Temperature in degrees Fahrenheit, derived from `temperature_c`.
    pub temperature_f: i32,

    /// Condition summary.
    pub summary: String,
}

impl WeatherForecast {
    /// Build a forecast entry, deriving the Fahrenheit reading.
    #[must_use]
    pub fn new(date: NaiveDate, temperature_c: i32, summary: String) -> Self {
        Self {
            date,
            temperature_c,
            temperature_f: fahrenheit_from_celsius(temperature_c),
            summary,
        }
    }
}

/// Convert a Celsius reading to whole degrees Fahrenheit.
fn fahrenheit_from_celsius(celsius: i32) -> i32 {
    32 + (f64::from(celsius) / 0.5556) as i32
}

/// Generate a random forecast for the next [`FORECAST_DAYS`] days.
#[must_use]
pub fn sample_forecast() -> Vec<WeatherForecast> {
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    (1..=FORECAST_DAYS)
        .map(|offset| {
            let summary = FORECAST_SUMMARIES
                .choose(&mut rng)
                .copied()
                .unwrap_or("Mild");

            WeatherForecast::new(
                today + Duration::days(offset),
                rng.gen_range(-20..55),
                summary.to_string(),
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fahrenheit_derivation() {
        let forecast = WeatherForecast::new(
            NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
            0,
            "Chilly".to_string(),
        );
        assert_eq!(forecast.temperature_f, 32);

        let forecast = WeatherForecast::new(
            NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
            100,
            "Scorching".to_string(),
        );
        assert_eq!(forecast.temperature_f, 211);
    }

    #[test]
    fn test_sample_forecast_shape() {
        let forecast = sample_forecast();

        assert_eq!(forecast.len(), 5);
        let today = Utc::now().date_naive();
        for (i, entry) in forecast.iter().enumerate() {
            assert_eq!(entry.date, today + Duration::days(i as i64 + 1));
            assert!((-20..55).contains(&entry.temperature_c));
            assert!(FORECAST_SUMMARIES.contains(&entry.summary.as_str()));
        }
    }

    #[test]
    fn test_serialization_field_names() {
        let forecast = WeatherForecast::new(
            NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
            21,
            "Mild".to_string(),
        );

        let json = serde_json::to_value(&forecast).unwrap();
        assert_eq!(json["date"], "2026-08-25");
        assert_eq!(json["temperature_c"], 21);
        assert_eq!(json["temperature_f"], 69);
        assert_eq!(json["summary"], "Mild");
    }
}
