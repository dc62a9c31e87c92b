//! Shared error taxonomy for token authentication.
//!
//! Every fetch/validate outcome is represented as a `Result` carrying one of
//! these variants; failures are never swallowed into an empty key set. The
//! `IntoResponse` impl maps each variant to an HTTP status with a generic
//! client-facing message. Actual error detail is logged server-side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors produced by key fetching, token validation, and header extraction.
///
/// Status code mapping:
/// - Network: 503 Service Unavailable (the identity provider is the
///   failing party, not the caller)
/// - Parse, MissingAuthorization, MissingToken, Signature,
///   MalformedToken: 401
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// JWKS endpoint unreachable or returned a non-success status.
    #[error("key set fetch failed: {0}")]
    Network(String),

    /// Malformed JWKS document, key entry, or claims body.
    #[error("parse error: {0}")]
    Parse(String),

    /// No Authorization header on the request.
    #[error("Authorization header is missing")]
    MissingAuthorization,

    /// Authorization header present but no bearer token after stripping.
    #[error("no bearer token in Authorization header")]
    MissingToken,

    /// Invalid or expired signature, or key id absent from the key set.
    #[error("signature verification failed: {0}")]
    Signature(String),

    /// Token does not have a parseable JWT structure.
    #[error("malformed token: {0}")]
    MalformedToken(String),
}

impl AuthError {
    /// HTTP status code this error maps to.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Network(_) => 503,
            AuthError::Parse(_)
            | AuthError::MissingAuthorization
            | AuthError::MissingToken
            | AuthError::Signature(_)
            | AuthError::MalformedToken(_) => 401,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AuthError::Network(detail) => {
                tracing::error!(target: "auth.jwks", error = %detail, "Key set fetch failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "IDP_UNAVAILABLE",
                    "Authentication service unavailable".to_string(),
                )
            }
            AuthError::Parse(detail) => {
                tracing::warn!(target: "auth.jwt", error = %detail, "Key material or claims parse failed");
                (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_TOKEN",
                    "The access token is invalid or expired".to_string(),
                )
            }
            AuthError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHORIZATION",
                "Authorization header is missing".to_string(),
            ),
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "MISSING_TOKEN",
                "No bearer token in Authorization header".to_string(),
            ),
            AuthError::Signature(detail) | AuthError::MalformedToken(detail) => {
                tracing::debug!(target: "auth.jwt", error = %detail, "Token rejected");
                (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_TOKEN",
                    "The access token is invalid or expired".to_string(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        let mut response = (status, Json(error_response)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            if let Ok(header_value) = "Bearer error=\"invalid_token\"".parse() {
                response
                    .headers_mut()
                    .insert("WWW-Authenticate", header_value);
            }
        }

        response
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::Network("down".to_string()).status_code(), 503);
        assert_eq!(AuthError::Parse("bad json".to_string()).status_code(), 401);
        assert_eq!(AuthError::MissingAuthorization.status_code(), 401);
        assert_eq!(AuthError::MissingToken.status_code(), 401);
        assert_eq!(AuthError::Signature("bad".to_string()).status_code(), 401);
        assert_eq!(
            AuthError::MalformedToken("not a jwt".to_string()).status_code(),
            401
        );
    }

    #[test]
    fn test_display_carries_detail() {
        let error = AuthError::Signature("unknown key id \"k9\"".to_string());
        assert_eq!(
            format!("{error}"),
            "signature verification failed: unknown key id \"k9\""
        );

        let error = AuthError::MissingAuthorization;
        assert_eq!(format!("{error}"), "Authorization header is missing");
    }

    #[tokio::test]
    async fn test_into_response_unauthorized_has_www_authenticate() {
        let response = AuthError::Signature("bad signature".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let www_auth = response.headers().get("WWW-Authenticate");
        assert!(www_auth.is_some());
        assert!(www_auth
            .unwrap()
            .to_str()
            .unwrap()
            .contains("invalid_token"));
    }

    #[tokio::test]
    async fn test_into_response_network_is_generic_503() {
        use http_body_util::BodyExt;

        let response = AuthError::Network("connection refused to 10.0.0.5".to_string())
            .into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "IDP_UNAVAILABLE");
        // Internal detail stays out of the client response
        assert!(!body.to_string().contains("10.0.0.5"));
    }
}
