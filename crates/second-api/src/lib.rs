//! Second API Service Library
//!
//! The peer of First API in the demo pair. Same JWT authentication against
//! the identity provider's JWKS endpoint; its forecast entries carry a
//! unique id and localized summaries, which is how callers can tell the
//! two services' responses apart.
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `handlers` - HTTP request handlers
//! - `models` - Data models
//! - `routes` - Axum router setup

pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
