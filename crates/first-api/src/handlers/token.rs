//! Token diagnostic handler.
//!
//! Validates a token passed as a query parameter against keys fetched
//! fresh from the provider, independent of the middleware's cached key
//! set. Useful for inspecting a token's claims while developing.

use crate::errors::ApiError;
use crate::routes::AppState;
use axum::extract::{Query, State};
use axum::Json;
use common::claims::ValidatedToken;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

/// Query parameters for the `/token` endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    /// The JWT to inspect.
    pub token: String,
}

/// Handler for GET /token?token=...
///
/// The inspected token is the query parameter, not the bearer token the
/// middleware already validated for this request.
///
/// ## Response
///
/// Returns 200 OK with the full decoded claims and the structured payload,
/// or the auth error mapping (401/503) when the token does not validate.
#[instrument(skip_all, name = "first_api.handlers.token")]
pub async fn validate_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<ValidatedToken>, ApiError> {
    let keys = state.validator.key_set().fetch_verification_keys().await?;
    let validated = state.validator.validate_with_keys(&query.token, &keys)?;

    Ok(Json(validated))
}
