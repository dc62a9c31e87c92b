//! Identity provider endpoint options.
//!
//! Both the provider base URL and the JWKS URL are explicit, named entries.
//! The JWKS URL defaults to the provider's well-known location when not set.

use std::fmt;

/// Well-known JWKS document path relative to the provider base URL.
pub const WELL_KNOWN_JWKS_PATH: &str = "/.well-known/jwks.json";

/// Identity provider endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct IdpOptions {
    /// Base URL of the identity provider.
    pub api_url: String,

    /// URL of the provider's JWKS document.
    pub jwks_url: String,
}

impl IdpOptions {
    /// Build options from a provider base URL and an optional explicit
    /// JWKS URL. When `jwks_url` is `None` the well-known path under
    /// `api_url` is used.
    #[must_use]
    pub fn new(api_url: impl Into<String>, jwks_url: Option<String>) -> Self {
        let api_url = api_url.into();
        let jwks_url = jwks_url.unwrap_or_else(|| {
            format!("{}{}", api_url.trim_end_matches('/'), WELL_KNOWN_JWKS_PATH)
        });

        Self { api_url, jwks_url }
    }
}

impl fmt::Debug for IdpOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdpOptions")
            .field("api_url", &self.api_url)
            .field("jwks_url", &self.jwks_url)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_jwks_url_defaults_to_well_known_path() {
        let options = IdpOptions::new("https://idp.example.com", None);
        assert_eq!(
            options.jwks_url,
            "https://idp.example.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn test_jwks_url_default_strips_trailing_slash() {
        let options = IdpOptions::new("https://idp.example.com/", None);
        assert_eq!(
            options.jwks_url,
            "https://idp.example.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn test_explicit_jwks_url_wins() {
        let options = IdpOptions::new(
            "https://idp.example.com",
            Some("https://keys.example.com/jwks".to_string()),
        );
        assert_eq!(options.jwks_url, "https://keys.example.com/jwks");
        assert_eq!(options.api_url, "https://idp.example.com");
    }
}
