//! HTTP routes for Second API.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use axum::{middleware, routing::get, Router};
use common::middleware::{require_auth, AuthState};
use common::validator::TokenValidator;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// Token validator backed by the provider's key set.
    pub validator: Arc<TokenValidator>,
}

/// Build the application routes.
///
/// Protected routes (bearer JWT required):
/// - `/weatherforecast` - Random five-day forecast with per-entry ids
/// - `/token` - Validate a token passed as a query parameter
/// - `/me` - Current user claims as a tagged result
///
/// Public routes:
/// - `/health` - Health check endpoint
pub fn build_routes(state: Arc<AppState>) -> Router {
    let auth_state = Arc::new(AuthState {
        validator: state.validator.clone(),
    });

    let protected_routes = Router::new()
        .route("/weatherforecast", get(handlers::get_forecast))
        .route("/token", get(handlers::validate_token))
        .route("/me", get(handlers::get_me))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state);

    public_routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
