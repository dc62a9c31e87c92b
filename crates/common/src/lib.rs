//! Shared authentication core for the paired demo APIs.
//!
//! Both services authenticate requests with JWTs signed by an external
//! identity provider. This crate holds everything they share:
//!
//! - `jwks` - fetching the provider's JSON Web Key Set and converting RSA
//!   key entries into verification keys, with a TTL cache
//! - `validator` - RS256 token validation and typed payload extraction
//! - `claims` - the structured claims payload projected from a token body
//! - `bearer` - Authorization header extraction and the recoverable
//!   user-info path
//! - `middleware` - axum authentication middleware for protected routes
//! - `options` - identity provider endpoint configuration
//! - `error` - the shared error taxonomy with HTTP response mapping

#![warn(clippy::pedantic)]

/// Module for the shared error taxonomy
pub mod error;

/// Module for identity provider endpoint options
pub mod options;

/// Module for JWT header utilities (kid extraction, size limits)
pub mod jwt;

/// Module for JWKS fetching and verification key construction
pub mod jwks;

/// Module for the structured claims payload
pub mod claims;

/// Module for token validation
pub mod validator;

/// Module for bearer token extraction and the diagnostic user-info path
pub mod bearer;

/// Module for axum authentication middleware
pub mod middleware;
