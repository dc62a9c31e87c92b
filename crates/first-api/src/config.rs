//! First API configuration.
//!
//! Configuration is loaded from environment variables. Both the identity
//! provider base URL and the JWKS URL are explicit, named entries; the
//! JWKS URL defaults to the well-known path under the provider base URL.

use common::options::IdpOptions;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default server bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:7000";

/// Default base URL of the peer Second API service.
pub const DEFAULT_PEER_BASE_URL: &str = "http://localhost:7001";

/// Default key cache TTL in seconds.
pub const DEFAULT_JWKS_CACHE_TTL_SECONDS: u64 = 300;

/// First API configuration.
///
/// Loaded from environment variables with sensible defaults. Only the
/// identity provider base URL is required.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:7000").
    pub bind_address: String,

    /// Identity provider endpoints.
    pub idp: IdpOptions,

    /// Key cache TTL in seconds (default: 300).
    pub jwks_cache_ttl_seconds: u64,

    /// Base URL of the peer Second API service, used by the proxy routes.
    pub peer_base_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid key cache TTL configuration: {0}")]
    InvalidCacheTtl(String),
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `IDP_API_URL` is absent or
    /// `JWKS_CACHE_TTL_SECONDS` is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let idp_api_url = vars
            .get("IDP_API_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("IDP_API_URL".to_string()))?
            .clone();

        let idp = IdpOptions::new(idp_api_url, vars.get("IDP_JWKS_URL").cloned());

        let jwks_cache_ttl_seconds =
            if let Some(value_str) = vars.get("JWKS_CACHE_TTL_SECONDS") {
                let value: u64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidCacheTtl(format!(
                        "JWKS_CACHE_TTL_SECONDS must be a valid integer, got '{}': {}",
                        value_str, e
                    ))
                })?;

                if value == 0 {
                    return Err(ConfigError::InvalidCacheTtl(
                        "JWKS_CACHE_TTL_SECONDS must be positive, got 0".to_string(),
                    ));
                }

                value
            } else {
                DEFAULT_JWKS_CACHE_TTL_SECONDS
            };

        let peer_base_url = vars
            .get("PEER_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_PEER_BASE_URL.to_string());

        Ok(Config {
            bind_address,
            idp,
            jwks_cache_ttl_seconds,
            peer_base_url,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn minimal_vars() -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert(
            "IDP_API_URL".to_string(),
            "https://idp.example.com".to_string(),
        );
        vars
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(&minimal_vars()).unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:7000");
        assert_eq!(config.idp.api_url, "https://idp.example.com");
        assert_eq!(
            config.idp.jwks_url,
            "https://idp.example.com/.well-known/jwks.json"
        );
        assert_eq!(config.jwks_cache_ttl_seconds, 300);
        assert_eq!(config.peer_base_url, "http://localhost:7001");
    }

    #[test]
    fn test_missing_idp_api_url() {
        let result = Config::from_vars(&HashMap::new());

        assert!(matches!(result, Err(ConfigError::MissingEnvVar(var)) if var == "IDP_API_URL"));
    }

    #[test]
    fn test_explicit_jwks_url() {
        let mut vars = minimal_vars();
        vars.insert(
            "IDP_JWKS_URL".to_string(),
            "https://keys.example.com/jwks".to_string(),
        );

        let config = Config::from_vars(&vars).unwrap();
        assert_eq!(config.idp.jwks_url, "https://keys.example.com/jwks");
    }

    #[test]
    fn test_cache_ttl_must_be_positive() {
        let mut vars = minimal_vars();
        vars.insert("JWKS_CACHE_TTL_SECONDS".to_string(), "0".to_string());

        assert!(matches!(
            Config::from_vars(&vars),
            Err(ConfigError::InvalidCacheTtl(_))
        ));
    }

    #[test]
    fn test_cache_ttl_must_be_numeric() {
        let mut vars = minimal_vars();
        vars.insert("JWKS_CACHE_TTL_SECONDS".to_string(), "soon".to_string());

        assert!(matches!(
            Config::from_vars(&vars),
            Err(ConfigError::InvalidCacheTtl(_))
        ));
    }

    #[test]
    fn test_peer_base_url_trailing_slash_stripped() {
        let mut vars = minimal_vars();
        vars.insert(
            "PEER_BASE_URL".to_string(),
            "http://second-api:7001/".to_string(),
        );

        let config = Config::from_vars(&vars).unwrap();
        assert_eq!(config.peer_base_url, "http://second-api:7001");
    }
}
