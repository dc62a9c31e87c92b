//! Weather forecast handler.

use crate::models::{self, WeatherForecast};
use axum::Json;
use tracing::instrument;

/// Handler for GET /weatherforecast
///
/// Returns a random five-day forecast with per-entry ids. Requires valid
/// authentication via the auth middleware.
#[instrument(skip_all, name = "second_api.handlers.forecast")]
pub async fn get_forecast() -> Json<Vec<WeatherForecast>> {
    Json(models::sample_forecast())
}
