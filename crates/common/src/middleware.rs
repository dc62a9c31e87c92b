//! Authentication middleware for protected routes.
//!
//! Extracts the bearer token from the Authorization header, validates it,
//! and injects the validated token into request extensions. Failures map
//! through the shared error responses (401 for token problems, 503 when
//! the provider is unreachable); the real error is logged server-side.

use crate::bearer::extract_bearer;
use crate::claims::ValidatedToken;
use crate::validator::TokenValidator;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::instrument;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    /// Token validator backed by the provider's key set.
    pub validator: Arc<TokenValidator>,
}

/// Authentication middleware that validates bearer JWTs.
///
/// # Response
///
/// - 401 Unauthorized (with `WWW-Authenticate`) when the token is missing
///   or invalid, 503 when the key set cannot be fetched
/// - Continues to the next handler with the [`ValidatedToken`] in request
///   extensions when the token is valid
///
/// # Errors
///
/// Returns the underlying `AuthError`, which maps to an HTTP response via
/// its `IntoResponse` impl.
#[instrument(skip_all, name = "middleware.auth")]
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, crate::error::AuthError> {
    let token = extract_bearer(req.headers()).map_err(|e| {
        tracing::debug!(target: "middleware.auth", error = %e, "Rejecting request without bearer token");
        e
    })?;

    let validated = state.validator.validate(token).await.map_err(|e| {
        tracing::warn!(target: "middleware.auth", error = %e, "Rejecting request with invalid token");
        e
    })?;

    req.extensions_mut().insert(validated);

    Ok(next.run(req).await)
}
