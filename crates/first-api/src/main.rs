//! First API
//!
//! Entry point for the first demo web service. Serves a JWT-protected
//! weather forecast, token diagnostics, and proxies to the Second API.

use common::jwks::KeySetClient;
use common::validator::{TokenValidator, ValidationOptions};
use first_api::config::Config;
use first_api::routes::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "first_api=debug,common=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting First API");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        bind_address = %config.bind_address,
        idp_api_url = %config.idp.api_url,
        jwks_url = %config.idp.jwks_url,
        jwks_cache_ttl_seconds = config.jwks_cache_ttl_seconds,
        peer_base_url = %config.peer_base_url,
        "Configuration loaded successfully"
    );

    // Set up the key set client and warm its cache. A fetch failure here
    // is not fatal: the provider may come up later, and every validation
    // retries the fetch.
    let key_set = Arc::new(KeySetClient::with_ttl(
        config.idp.jwks_url.clone(),
        Duration::from_secs(config.jwks_cache_ttl_seconds),
    ));
    if let Err(e) = key_set.refresh().await {
        warn!("Initial JWKS fetch failed, continuing without warm cache: {}", e);
    }

    // The demo provider issues tokens whose audience is not known ahead of
    // time, so issuer/audience checks are explicitly opted out of here.
    let validator = Arc::new(TokenValidator::new(
        key_set,
        ValidationOptions::without_issuer_audience_checks(),
    ));

    // Parse bind address before moving config
    let bind_address = config.bind_address.clone();

    // Create application state
    let state = Arc::new(AppState {
        config,
        validator,
        http: reqwest::Client::new(),
    });

    // Build application routes
    let app = routes::build_routes(state);

    // Parse bind address
    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("First API listening on {}", addr);

    // Start server with graceful shutdown support
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("First API shutdown complete");

    Ok(())
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
