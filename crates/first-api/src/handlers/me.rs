//! Current user handler.
//!
//! Revalidates the request's bearer token and reports the outcome as a
//! tagged result instead of an error status. The middleware has already
//! vetted the token by the time this runs, so the error arm only shows up
//! when the token expires between the two checks or the key set goes away.

use crate::routes::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use common::bearer::{user_info, UserInfoResult};
use std::sync::Arc;
use tracing::instrument;

/// Handler for GET /me
///
/// ## Response
///
/// Always 200 OK. The body is either the validated token (full claims plus
/// the structured payload) or `{"error": "..."}` with the failure reason.
#[instrument(skip_all, name = "first_api.handlers.me")]
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<UserInfoResult> {
    Json(user_info(&state.validator, &headers).await)
}
