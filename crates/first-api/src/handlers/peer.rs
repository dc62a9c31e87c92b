//! Peer proxy handlers.
//!
//! Forward requests to the Second API service, passing the caller's
//! Authorization header through so the peer can authenticate the same
//! user. Peer responses are relayed as raw JSON.

use crate::errors::ApiError;
use crate::routes::AppState;
use axum::extract::State;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// Handler for GET /weatherforecast-two
///
/// Fetches the peer's forecast. This route itself is public; the peer
/// still enforces authentication, so a missing or invalid bearer token
/// surfaces as a peer failure.
#[instrument(skip_all, name = "first_api.handlers.peer_forecast")]
pub async fn forecast_from_peer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    proxy_get(&state, &headers, "/weatherforecast").await
}

/// Handler for GET /me-two
///
/// Fetches the peer's view of the current user. Requires valid
/// authentication via the auth middleware.
#[instrument(skip_all, name = "first_api.handlers.peer_me")]
pub async fn me_from_peer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    proxy_get(&state, &headers, "/me").await
}

/// GET a peer endpoint, forwarding the caller's Authorization header.
async fn proxy_get(
    state: &AppState,
    headers: &HeaderMap,
    path: &str,
) -> Result<Json<serde_json::Value>, ApiError> {
    let url = format!("{}{}", state.config.peer_base_url, path);

    let mut request = state.http.get(&url);
    if let Some(authorization) = headers.get(AUTHORIZATION) {
        request = request.header(AUTHORIZATION, authorization.clone());
    }

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Peer(format!("GET {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Peer(format!("GET {url}: peer returned {status}")));
    }

    let body = response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| ApiError::Peer(format!("GET {url}: invalid JSON body: {e}")))?;

    Ok(Json(body))
}
