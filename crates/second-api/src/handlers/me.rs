//! Current user handler.

use crate::routes::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use common::bearer::{user_info, UserInfoResult};
use std::sync::Arc;
use tracing::instrument;

/// Handler for GET /me
///
/// Revalidates the request's bearer token and reports the outcome as a
/// tagged result. Always 200 OK; the error arm carries the failure reason.
#[instrument(skip_all, name = "second_api.handlers.me")]
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<UserInfoResult> {
    Json(user_info(&state.validator, &headers).await)
}
