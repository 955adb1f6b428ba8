//! Mock session helpers for integration tests.
//!
//! Services receive the identity provider's session token in the
//! `pantry_session` cookie. `MockSession` mints such a token with a test
//! secret so no real provider is needed.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use pantry_auth_types::identity::SESSION_COOKIE;
use pantry_auth_types::token::issue_session_token;
use pantry_domain::id::UserId;

pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-unit-tests-only";

/// Configurable signed-in identity injected into test requests.
pub struct MockSession {
    pub user_id: UserId,
    pub name: Option<String>,
    pub secret: String,
}

impl MockSession {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            name: None,
            secret: TEST_SESSION_SECRET.to_owned(),
        }
    }

    pub fn random() -> Self {
        Self::new(UserId(Uuid::new_v4()))
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// A valid token expiring one hour from now.
    pub fn token(&self) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600;
        issue_session_token(self.user_id, self.name.as_deref(), exp, &self.secret).unwrap()
    }

    /// `Cookie: pantry_session=<token>` as the browser would send it.
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.token())
    }

    /// Request headers carrying the session cookie.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static("cookie"),
            HeaderValue::from_str(&self.cookie()).unwrap(),
        );
        map
    }
}
