//! First API error types.
//!
//! Authentication failures delegate to the shared auth error mapping;
//! peer-service failures map to 502 with a generic client message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::AuthError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by First API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Token extraction or validation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A call to the peer service failed.
    #[error("peer request failed: {0}")]
    Peer(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(err) => err.into_response(),
            ApiError::Peer(detail) => {
                tracing::error!(target: "first_api.peer", error = %detail, "Peer request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({
                        "error": {
                            "code": "PEER_UNAVAILABLE",
                            "message": "Peer service unavailable"
                        }
                    })),
                )
                    .into_response()
            }
        }
    }
}
