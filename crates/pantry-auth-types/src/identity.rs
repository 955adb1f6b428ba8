//! Session-token extractor.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::request::Parts;

/// Cookie carrying the identity provider's session token.
pub const SESSION_COOKIE: &str = "pantry_session";

/// Raw session token presented with a request, if any.
///
/// Read from the `pantry_session` cookie, falling back to an
/// `Authorization: Bearer` header. Extraction never fails: an absent token
/// means an anonymous request. Validation happens later, against the
/// service's secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn from_parts(parts: &Parts) -> Self {
        let from_cookie = CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty());
        let token = from_cookie.or_else(|| {
            parts
                .headers
                .typed_get::<Authorization<Bearer>>()
                .map(|auth| auth.token().to_owned())
        });
        Self(token)
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    // Read headers synchronously and return a 'static future so the
    // returned future does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = Self::from_parts(parts);
        async move { Ok(token) }
    }
}
