//! Session-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "issue", test))]
use serde::Serialize;
use uuid::Uuid;

use pantry_domain::id::UserId;

/// Identity carried by a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub user_id: UserId,
    /// Display name asserted by the identity provider, if any.
    pub name: Option<String>,
    pub expires_at: u64,
}

/// Errors returned by [`validate_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("session expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload of a session token.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `exp` | `exp` | expiry, seconds since epoch |
/// | `name` | custom, optional | provider display name |
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "issue", test), derive(Serialize))]
pub struct SessionClaims {
    pub sub: String,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Decode and validate a session token.
///
/// Validation: HS256, `exp` checked with the default 60s leeway, `exp` and
/// `sub` required.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionInfo, SessionError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => SessionError::InvalidSignature,
        _ => SessionError::Malformed,
    })?;

    let claims = data.claims;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| SessionError::Malformed)?;
    Ok(SessionInfo {
        user_id: UserId(user_id),
        name: claims.name.filter(|n| !n.trim().is_empty()),
        expires_at: claims.exp,
    })
}

/// Mint a session token the way the identity provider does.
///
/// Requires the `issue` feature; production services only validate.
#[cfg(any(feature = "issue", test))]
pub fn issue_session_token(
    user_id: UserId,
    name: Option<&str>,
    exp: u64,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = SessionClaims {
        sub: user_id.to_string(),
        exp,
        name: name.map(str::to_owned),
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
}
