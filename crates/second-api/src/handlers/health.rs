//! Health check handler.

use axum::Json;
use serde::Serialize;
use tracing::instrument;

/// Response for the `/health` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the service is able to respond.
    pub status: String,

    /// Service name, to tell the two demo services apart.
    pub service: String,
}

/// Health check handler.
#[instrument(skip_all, name = "second_api.health.check")]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "second-api".to_string(),
    })
}
