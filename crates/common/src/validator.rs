//! RS256 token validation against a fetched key set.
//!
//! Validation is a single-shot, synchronous decision given a token and a
//! key set; the only async part is fetching keys. Only RS256 is accepted,
//! so unsigned (`alg: none`) tokens are always rejected.

use crate::claims::{TokenPayload, ValidatedToken};
use crate::error::AuthError;
use crate::jwks::{KeySetClient, VerificationKey};
use crate::jwt::{extract_kid, validate_iat, DEFAULT_CLOCK_SKEW};
use jsonwebtoken::{decode, Algorithm, Validation};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Which issuer/audience checks to apply during validation.
///
/// The safe default is checks enabled; disabling them is an explicit,
/// named opt-out so a skimmed config review can spot it.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Expected `iss` value, checked when set.
    pub expected_issuer: Option<String>,

    /// Accepted `aud` values, checked when set.
    pub expected_audience: Option<Vec<String>>,

    /// Issued-at clock skew tolerance.
    pub clock_skew: Duration,
}

impl ValidationOptions {
    /// Options with issuer and audience checks enabled.
    #[must_use]
    pub fn new(expected_issuer: String, expected_audience: Vec<String>) -> Self {
        Self {
            expected_issuer: Some(expected_issuer),
            expected_audience: Some(expected_audience),
            clock_skew: DEFAULT_CLOCK_SKEW,
        }
    }

    /// Explicitly disable issuer and audience checks.
    ///
    /// Signature and expiry are still verified. Only appropriate for demo
    /// setups where the token audience is not known ahead of time.
    #[must_use]
    pub fn without_issuer_audience_checks() -> Self {
        Self {
            expected_issuer: None,
            expected_audience: None,
            clock_skew: DEFAULT_CLOCK_SKEW,
        }
    }
}

/// Token validator backed by the identity provider's key set.
pub struct TokenValidator {
    key_set: Arc<KeySetClient>,
    options: ValidationOptions,
}

impl TokenValidator {
    /// Create a validator.
    ///
    /// Logs a warning when issuer/audience checks are disabled so the
    /// opt-out is visible at startup.
    #[must_use]
    pub fn new(key_set: Arc<KeySetClient>, options: ValidationOptions) -> Self {
        if options.expected_issuer.is_none() && options.expected_audience.is_none() {
            tracing::warn!(
                target: "auth.jwt",
                "Issuer and audience validation are disabled; tokens for any recipient are accepted"
            );
        }

        Self { key_set, options }
    }

    /// The key set client this validator resolves kids against.
    #[must_use]
    pub fn key_set(&self) -> &Arc<KeySetClient> {
        &self.key_set
    }

    /// Validate a token, resolving its signing key through the cached key
    /// set.
    ///
    /// # Errors
    ///
    /// - `MalformedToken` - unparseable JWT structure
    /// - `Signature` - invalid/expired signature or unknown key id
    /// - `Parse` - claims body fails the payload projection
    /// - `Network` - the key set could not be fetched
    #[instrument(skip_all)]
    pub async fn validate(&self, token: &str) -> Result<ValidatedToken, AuthError> {
        let kid = extract_kid(token)?;
        let key = self.key_set.get_key(&kid).await?;
        self.verify_with_key(token, &key)
    }

    /// Validate a token against an explicitly supplied key set.
    ///
    /// Used by the diagnostic endpoint that fetches keys fresh per call.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate), except a kid absent from
    /// `keys` fails with `Signature` without any fetch.
    #[instrument(skip_all)]
    pub fn validate_with_keys(
        &self,
        token: &str,
        keys: &[VerificationKey],
    ) -> Result<ValidatedToken, AuthError> {
        let kid = extract_kid(token)?;
        let key = keys
            .iter()
            .find(|key| key.kid == kid)
            .ok_or_else(|| AuthError::Signature(format!("unknown key id {kid:?}")))?;

        self.verify_with_key(token, key)
    }

    /// Verify the signature and project the claims payload.
    fn verify_with_key(
        &self,
        token: &str,
        key: &VerificationKey,
    ) -> Result<ValidatedToken, AuthError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;

        match &self.options.expected_audience {
            Some(audience) => validation.set_audience(audience),
            None => validation.validate_aud = false,
        }
        if let Some(issuer) = &self.options.expected_issuer {
            validation.set_issuer(&[issuer]);
        }

        let token_data = decode::<serde_json::Value>(token, key.decoding_key(), &validation)
            .map_err(map_decode_error)?;
        let claims = token_data.claims;

        if let Some(iat) = claims.get("iat").and_then(|v| v.as_i64()) {
            validate_iat(iat, self.options.clock_skew)?;
        }

        let payload = TokenPayload::from_claims(&claims)?;

        tracing::debug!(target: "auth.jwt", "Token validated successfully");
        Ok(ValidatedToken { claims, payload })
    }
}

/// Map jsonwebtoken's error kinds onto the shared taxonomy.
fn map_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::MalformedToken(err.to_string()),
        _ => AuthError::Signature(err.to_string()),
    }
}
