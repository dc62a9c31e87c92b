//! JWKS client: fetches the identity provider's key set and converts RSA
//! key entries into verification keys.
//!
//! Keys are cached with a TTL so routine validation does not hit the
//! provider on every request, and a cache miss triggers a refetch so a key
//! rotation at the provider is picked up without a process restart.
//!
//! Fetch failures are always surfaced as errors; a missing or unparseable
//! document never silently yields an empty key set.

use crate::error::AuthError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::instrument;

/// Default cache TTL in seconds (5 minutes).
const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// JWKS fetch timeout.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One JSON Web Key entry from the JWKS document.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    /// Key type (must be "RSA").
    pub kty: String,

    /// Key id, correlates a token's signing key to this entry.
    pub kid: String,

    /// Algorithm (should be "RS256" when present).
    #[serde(default)]
    pub alg: Option<String>,

    /// RSA modulus (base64url encoded).
    #[serde(default)]
    pub n: Option<String>,

    /// RSA public exponent (base64url encoded).
    #[serde(default)]
    pub e: Option<String>,

    /// Key use (should be "sig").
    #[serde(default, rename = "use")]
    pub key_use: Option<String>,
}

/// JWKS document: `{ "keys": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct JwksResponse {
    /// List of JSON Web Keys.
    pub keys: Vec<Jwk>,
}

/// A verification key derived from one JWKS entry.
///
/// Holds the raw RSA components alongside a ready `DecodingKey` for
/// signature verification, tagged with the originating key id.
#[derive(Clone)]
pub struct VerificationKey {
    /// Key id of the originating JWKS entry.
    pub kid: String,

    /// RSA modulus bytes (base64url-decoded `n`).
    pub modulus: Vec<u8>,

    /// RSA public exponent bytes (base64url-decoded `e`).
    pub exponent: Vec<u8>,

    decoding_key: DecodingKey,
}

impl VerificationKey {
    /// Build a verification key from a JWKS entry.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Parse` when the entry is not an RS256 RSA key or
    /// its `n`/`e` components are missing or not valid base64url.
    pub fn from_jwk(jwk: &Jwk) -> Result<Self, AuthError> {
        if jwk.kty != "RSA" {
            return Err(AuthError::Parse(format!(
                "key {} has unsupported kty {:?}",
                jwk.kid, jwk.kty
            )));
        }

        if let Some(alg) = &jwk.alg {
            if alg != "RS256" {
                return Err(AuthError::Parse(format!(
                    "key {} has unsupported alg {:?}",
                    jwk.kid, alg
                )));
            }
        }

        let n = jwk
            .n
            .as_ref()
            .ok_or_else(|| AuthError::Parse(format!("key {} has no modulus", jwk.kid)))?;
        let e = jwk
            .e
            .as_ref()
            .ok_or_else(|| AuthError::Parse(format!("key {} has no exponent", jwk.kid)))?;

        let modulus = URL_SAFE_NO_PAD
            .decode(n)
            .map_err(|err| AuthError::Parse(format!("key {} modulus: {err}", jwk.kid)))?;
        let exponent = URL_SAFE_NO_PAD
            .decode(e)
            .map_err(|err| AuthError::Parse(format!("key {} exponent: {err}", jwk.kid)))?;

        // jsonwebtoken takes the base64url components directly
        let decoding_key = DecodingKey::from_rsa_components(n, e)
            .map_err(|err| AuthError::Parse(format!("key {}: {err}", jwk.kid)))?;

        Ok(Self {
            kid: jwk.kid.clone(),
            modulus,
            exponent,
            decoding_key,
        })
    }

    /// The decoding key for signature verification.
    #[must_use]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationKey")
            .field("kid", &self.kid)
            .field("modulus_len", &self.modulus.len())
            .field("exponent_len", &self.exponent.len())
            .finish()
    }
}

/// Cached key set with expiry time.
struct CachedKeys {
    keys: HashMap<String, VerificationKey>,
    expires_at: Instant,
}

/// Client for fetching and caching verification keys from the identity
/// provider's JWKS endpoint.
pub struct KeySetClient {
    jwks_url: String,
    http_client: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
    cache_ttl: Duration,
}

impl KeySetClient {
    /// Create a client with the default cache TTL.
    #[must_use]
    pub fn new(jwks_url: String) -> Self {
        Self::with_ttl(jwks_url, Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS))
    }

    /// Create a client with a custom cache TTL.
    #[must_use]
    pub fn with_ttl(jwks_url: String, cache_ttl: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(target: "auth.jwks", error = %e, "Failed to build HTTP client with custom config, using defaults");
                reqwest::Client::new()
            });

        Self {
            jwks_url,
            http_client,
            cache: RwLock::new(None),
            cache_ttl,
        }
    }

    /// The JWKS URL this client fetches from.
    #[must_use]
    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Fetch the key set and convert every entry, bypassing the cache.
    ///
    /// A well-formed document with N entries yields exactly N keys.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Network` when the endpoint is unreachable or
    /// returns a non-success status, and `AuthError::Parse` when the
    /// document or any key entry is malformed.
    #[instrument(skip(self))]
    pub async fn fetch_verification_keys(&self) -> Result<Vec<VerificationKey>, AuthError> {
        tracing::debug!(target: "auth.jwks", url = %self.jwks_url, "Fetching JWKS");

        let response = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::Network(format!("GET {}: {e}", self.jwks_url)))?;

        if !response.status().is_success() {
            return Err(AuthError::Network(format!(
                "GET {} returned {}",
                self.jwks_url,
                response.status()
            )));
        }

        let jwks: JwksResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(format!("JWKS document: {e}")))?;

        jwks.keys
            .iter()
            .map(VerificationKey::from_jwk)
            .collect::<Result<Vec<_>, _>>()
    }

    /// Get a verification key by key id.
    ///
    /// Serves from the cache when fresh; a cache miss or expiry triggers a
    /// refetch so rotated keys are picked up without a restart.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Network`/`AuthError::Parse` when the key set
    /// cannot be fetched, and `AuthError::Signature` when the key id is not
    /// in the provider's current key set.
    #[instrument(skip(self), fields(kid = %kid))]
    pub async fn get_key(&self, kid: &str) -> Result<VerificationKey, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.expires_at > Instant::now() {
                    if let Some(key) = cached.keys.get(kid) {
                        tracing::debug!(target: "auth.jwks", kid = %kid, "JWKS cache hit");
                        return Ok(key.clone());
                    }
                }
            }
        }

        // Cache miss, expired, or unknown kid: fetch fresh keys
        self.refresh().await?;

        let cache = self.cache.read().await;
        if let Some(cached) = cache.as_ref() {
            if let Some(key) = cached.keys.get(kid) {
                return Ok(key.clone());
            }
        }

        tracing::warn!(target: "auth.jwks", kid = %kid, "Key not found in JWKS after refresh");
        Err(AuthError::Signature(format!("unknown key id {kid:?}")))
    }

    /// Refresh the cache from the JWKS endpoint.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Network`/`AuthError::Parse` when the fetch fails;
    /// the previous cache contents are kept in that case.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let keys = self.fetch_verification_keys().await?;

        let keys: HashMap<String, VerificationKey> = keys
            .into_iter()
            .map(|key| (key.kid.clone(), key))
            .collect();

        tracing::info!(
            target: "auth.jwks",
            key_count = keys.len(),
            "JWKS cache refreshed"
        );

        let mut cache = self.cache.write().await;
        *cache = Some(CachedKeys {
            keys,
            expires_at: Instant::now() + self.cache_ttl,
        });

        Ok(())
    }
}
