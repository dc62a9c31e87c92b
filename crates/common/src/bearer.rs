//! Bearer token extraction and the recoverable user-info path.
//!
//! The user-info path backs the diagnostic `/me` endpoint: instead of
//! propagating validation errors it converts every outcome into a tagged
//! result carrying either the validated token or the error's message
//! string. Stack traces and internal detail never reach the caller.

use crate::claims::ValidatedToken;
use crate::error::AuthError;
use crate::validator::TokenValidator;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use serde::Serialize;

/// Extract the bearer token from a request's `Authorization` header.
///
/// Strips the literal `"Bearer "` prefix and surrounding whitespace.
///
/// # Errors
///
/// - `MissingAuthorization` - no `Authorization` header on the request
/// - `MissingToken` - header present but no non-empty token after
///   stripping the prefix
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthorization)?
        .to_str()
        .map_err(|_| AuthError::MissingToken)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Tagged outcome of the user-info path.
///
/// Serializes untagged: success is the validated token object, failure is
/// `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum UserInfoResult {
    /// The bearer token validated successfully.
    Valid(ValidatedToken),

    /// Extraction or validation failed; carries the error message only.
    Invalid {
        /// Human-readable failure reason.
        error: String,
    },
}

impl UserInfoResult {
    /// Whether this is the success variant.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, UserInfoResult::Valid(_))
    }
}

/// Validate the current request's bearer token, converting every failure
/// into a tagged error result.
pub async fn user_info(validator: &TokenValidator, headers: &HeaderMap) -> UserInfoResult {
    let token = match extract_bearer(headers) {
        Ok(token) => token,
        Err(e) => {
            tracing::debug!(target: "auth.bearer", error = %e, "No usable bearer token on request");
            return UserInfoResult::Invalid {
                error: e.to_string(),
            };
        }
    };

    match validator.validate(token).await {
        Ok(validated) => UserInfoResult::Valid(validated),
        Err(e) => {
            tracing::warn!(target: "auth.bearer", error = %e, "Token validation failed on user-info path");
            UserInfoResult::Invalid {
                error: e.to_string(),
            }
        }
    }
}
