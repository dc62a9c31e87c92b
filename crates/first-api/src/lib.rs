//! First API Service Library
//!
//! Demo web service protected by bearer JWT authentication against an
//! external identity provider's JWKS endpoint. Exposes a weather forecast
//! resource plus diagnostic endpoints for token inspection, and proxies two
//! routes to the peer Second API service.
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `models` - Data models
//! - `routes` - Axum router setup

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
