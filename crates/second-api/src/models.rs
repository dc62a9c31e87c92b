//! Second API data models.
//!
//! Unlike First API's forecast, every entry carries a unique id and the
//! summaries are localized, so interleaved responses from the two services
//! stay distinguishable.

use chrono::{Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

/// Weather condition summaries the forecast picks from.
pub const FORECAST_SUMMARIES: [&str; 10] = [
    "Мороз",
    "Прохладно",
    "Прохладновато",
    "Прохладно",
    "Умеренно",
    "Тепло",
    "Тепло",
    "Жарко",
    "Очень жарко",
    "Огненно жарко",
];

/// Number of days a forecast covers.
pub const FORECAST_DAYS: i64 = 5;

/// A single day's weather forecast.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherForecast {
    /// Unique id of this forecast entry.
    pub id: Uuid,

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
    /// Build a forecast entry with a fresh id, deriving the Fahrenheit
    /// reading.
    #[must_use]
    pub fn new(date: NaiveDate, temperature_c: i32, summary: String) -> Self {
        Self {
            id: Uuid::new_v4(),
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
                .unwrap_or("Умеренно");

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
    use std::collections::HashSet;

    #[test]
    fn test_entries_have_unique_ids() {
        let forecast = sample_forecast();

        let ids: HashSet<Uuid> = forecast.iter().map(|entry| entry.id).collect();
        assert_eq!(ids.len(), forecast.len());
    }

    #[test]
    fn test_sample_forecast_shape() {
        let forecast = sample_forecast();

        assert_eq!(forecast.len(), 5);
        for entry in &forecast {
            assert!((-20..55).contains(&entry.temperature_c));
            assert!(FORECAST_SUMMARIES.contains(&entry.summary.as_str()));
        }
    }

    #[test]
    fn test_serialization_includes_id() {
        let forecast = WeatherForecast::new(
            NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
            0,
            "Мороз".to_string(),
        );

        let json = serde_json::to_value(&forecast).unwrap();
        assert!(json["id"].is_string());
        assert_eq!(json["temperature_f"], 32);
        assert_eq!(json["summary"], "Мороз");
    }
}
