//! JWT header utilities.
//!
//! Pre-verification plumbing shared by the validator: token size limits,
//! key id extraction from the unverified header, and the issued-at clock
//! skew check.
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - `extract_kid` does NOT verify the signature; the token must still be
//!   verified against the key the kid resolves to

use crate::error::AuthError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use std::time::Duration;

/// Maximum allowed JWT size in bytes (8KB).
///
/// Typical tokens are well under 1KB; anything larger is rejected before
/// base64 decoding or signature checks run.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// Default issued-at clock skew tolerance (5 minutes).
pub const DEFAULT_CLOCK_SKEW: Duration = Duration::from_secs(300);

/// Extract the `kid` (key id) from a JWT header without verifying the
/// signature.
///
/// The returned kid is only meaningful as a lookup key into a trusted JWKS;
/// signature verification must follow.
///
/// # Errors
///
/// Returns `AuthError::MalformedToken` when the token exceeds the size
/// limit, is not a three-part JWT, or its header is not valid
/// base64url-encoded JSON with a non-empty string `kid`.
pub fn extract_kid(token: &str) -> Result<String, AuthError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        return Err(AuthError::MalformedToken(format!(
            "token size {} exceeds {} byte limit",
            token.len(),
            MAX_JWT_SIZE_BYTES
        )));
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::MalformedToken(format!(
            "expected 3 token segments, got {}",
            parts.len()
        )));
    }

    let header_part = parts
        .first()
        .ok_or_else(|| AuthError::MalformedToken("empty token".to_string()))?;
    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_part)
        .map_err(|e| AuthError::MalformedToken(format!("header is not base64url: {e}")))?;

    let header: serde_json::Value = serde_json::from_slice(&header_bytes)
        .map_err(|e| AuthError::MalformedToken(format!("header is not JSON: {e}")))?;

    header
        .get("kid")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| AuthError::MalformedToken("header has no kid".to_string()))
}

/// Validate the `iat` (issued-at) claim with clock skew tolerance.
///
/// Rejects tokens issued further in the future than `clock_skew` allows.
///
/// # Errors
///
/// Returns `AuthError::Signature` when the iat is too far in the future.
pub fn validate_iat(iat: i64, clock_skew: Duration) -> Result<(), AuthError> {
    let now = chrono::Utc::now().timestamp();
    validate_iat_at(iat, clock_skew, now)
}

/// Deterministic iat validation against an explicit `now` timestamp.
///
/// Exists so boundary conditions can be unit-tested without wall-clock
/// dependence; production code goes through [`validate_iat`].
pub(crate) fn validate_iat_at(iat: i64, clock_skew: Duration, now: i64) -> Result<(), AuthError> {
    let clock_skew_secs = i64::try_from(clock_skew.as_secs()).unwrap_or(i64::MAX);
    let max_iat = now.saturating_add(clock_skew_secs);

    if iat > max_iat {
        return Err(AuthError::Signature(format!(
            "iat {iat} is more than {clock_skew_secs}s in the future"
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_kid_valid_token() {
        let header = r#"{"alg":"RS256","typ":"JWT","kid":"key-01"}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header);
        let token = format!("{header_b64}.payload.signature");

        assert_eq!(extract_kid(&token).unwrap(), "key-01");
    }

    #[test]
    fn test_extract_kid_missing_kid() {
        let header = r#"{"alg":"RS256","typ":"JWT"}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header);
        let token = format!("{header_b64}.payload.signature");

        assert!(matches!(
            extract_kid(&token),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_extract_kid_empty_string_kid() {
        let header = r#"{"alg":"RS256","kid":""}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header);
        let token = format!("{header_b64}.payload.signature");

        assert!(matches!(
            extract_kid(&token),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_extract_kid_non_string_kid() {
        let header = r#"{"alg":"RS256","kid":12345}"#;
        let header_b64 = URL_SAFE_NO_PAD.encode(header);
        let token = format!("{header_b64}.payload.signature");

        assert!(matches!(
            extract_kid(&token),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_extract_kid_wrong_segment_count() {
        assert!(extract_kid("only.two").is_err());
        assert!(extract_kid("one.two.three.four").is_err());
        assert!(extract_kid("single").is_err());
        assert!(extract_kid("").is_err());
    }

    #[test]
    fn test_extract_kid_invalid_base64() {
        assert!(extract_kid("!!!bad!!!.payload.signature").is_err());
    }

    #[test]
    fn test_extract_kid_invalid_json() {
        let header_b64 = URL_SAFE_NO_PAD.encode("not json");
        let token = format!("{header_b64}.payload.signature");
        assert!(extract_kid(&token).is_err());
    }

    #[test]
    fn test_extract_kid_oversized_token() {
        let oversized = "a".repeat(MAX_JWT_SIZE_BYTES + 1);
        assert!(matches!(
            extract_kid(&oversized),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_validate_iat_past_and_present() {
        let now = chrono::Utc::now().timestamp();
        assert!(validate_iat(now, DEFAULT_CLOCK_SKEW).is_ok());
        assert!(validate_iat(now - 3600, DEFAULT_CLOCK_SKEW).is_ok());
    }

    #[test]
    fn test_validate_iat_at_boundary() {
        let now = 1_700_000_000_i64;

        // iat == now + skew is the last accepted value
        assert!(validate_iat_at(now + 300, DEFAULT_CLOCK_SKEW, now).is_ok());
        assert!(matches!(
            validate_iat_at(now + 301, DEFAULT_CLOCK_SKEW, now),
            Err(AuthError::Signature(_))
        ));
    }
}
