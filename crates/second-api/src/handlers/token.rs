//! Token diagnostic handler.
//!
//! Same contract as First API's `/token`: the inspected token comes from
//! the query string and is checked against keys fetched fresh from the
//! provider.

use crate::routes::AppState;
use axum::extract::{Query, State};
use axum::Json;
use common::claims::ValidatedToken;
use common::error::AuthError;
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
#[instrument(skip_all, name = "second_api.handlers.token")]
pub async fn validate_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<ValidatedToken>, AuthError> {
    let keys = state.validator.key_set().fetch_verification_keys().await?;
    let validated = state.validator.validate_with_keys(&query.token, &keys)?;

    Ok(Json(validated))
}
