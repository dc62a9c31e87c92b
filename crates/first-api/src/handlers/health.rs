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
///
/// The service has no stateful backends to probe, so answering at all
/// means healthy.
#[instrument(skip_all, name = "first_api.health.check")]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "first-api".to_string(),
    })
}
