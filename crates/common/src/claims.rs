//! Structured claims payload projected from a validated token body.
//!
//! The identity provider puts an email object alongside the registered
//! claims; the projection here is schema-validated and fails with a named
//! parse error when a required field is absent or has the wrong shape,
//! instead of panicking on a bad cast.

use crate::error::AuthError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Email claim object nested in the token body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailClaims {
    /// The user's current primary email address.
    pub address: String,

    /// Whether this address is the primary email. Redundant today because
    /// only the primary email is included in the token.
    pub is_primary: bool,

    /// Whether the address has been verified.
    pub is_verified: bool,
}

/// Domain payload projected from the decoded claims body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPayload {
    /// The user id (`sub`).
    pub subject: String,

    /// Intended recipients of the token (`aud`), never empty.
    pub audience: Vec<String>,

    /// When the token was created (`iat`).
    pub issued_at: DateTime<Utc>,

    /// When the token expires (`exp`).
    pub expires_at: DateTime<Utc>,

    /// The user's email claim object.
    pub email: EmailClaims,
}

impl TokenPayload {
    /// Project the payload out of a decoded claims body.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Parse` naming the first claim that is missing or
    /// has the wrong shape.
    pub fn from_claims(claims: &serde_json::Value) -> Result<Self, AuthError> {
        let subject = claims
            .get("sub")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AuthError::Parse("claim sub is missing or not a string".to_string()))?
            .to_string();

        let audience = parse_audience(claims.get("aud"))?;

        let issued_at = parse_epoch_seconds(claims.get("iat"), "iat")?;
        let expires_at = parse_epoch_seconds(claims.get("exp"), "exp")?;

        let email_value = claims
            .get("email")
            .ok_or_else(|| AuthError::Parse("claim email is missing".to_string()))?;
        let email: EmailClaims = serde_json::from_value(email_value.clone())
            .map_err(|e| AuthError::Parse(format!("claim email: {e}")))?;

        Ok(Self {
            subject,
            audience,
            issued_at,
            expires_at,
            email,
        })
    }
}

/// Parse the `aud` claim into a non-empty list of strings.
///
/// A bare string audience is accepted as a one-element list, per RFC 7519's
/// special case for a single recipient.
fn parse_audience(value: Option<&serde_json::Value>) -> Result<Vec<String>, AuthError> {
    let value = value.ok_or_else(|| AuthError::Parse("claim aud is missing".to_string()))?;

    let audience = match value {
        serde_json::Value::String(s) => vec![s.clone()],
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(ToString::to_string).ok_or_else(|| {
                    AuthError::Parse("claim aud contains a non-string entry".to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => {
            return Err(AuthError::Parse(
                "claim aud is neither a string nor a list".to_string(),
            ))
        }
    };

    if audience.is_empty() {
        return Err(AuthError::Parse("claim aud is empty".to_string()));
    }

    Ok(audience)
}

/// Parse a Unix-epoch-seconds claim into an absolute timestamp.
fn parse_epoch_seconds(
    value: Option<&serde_json::Value>,
    name: &str,
) -> Result<DateTime<Utc>, AuthError> {
    let seconds = value
        .and_then(|v| v.as_i64())
        .ok_or_else(|| AuthError::Parse(format!("claim {name} is missing or not a number")))?;

    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| AuthError::Parse(format!("claim {name} is out of range: {seconds}")))
}

/// Result of a successful validation: the full decoded claims body plus the
/// structured payload. Constructed once per validation call.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedToken {
    /// All claims from the decoded token body.
    pub claims: serde_json::Value,

    /// The structured projection of the claims.
    pub payload: TokenPayload,
}
