//! Builder patterns for test data construction
//!
//! Provides fluent APIs for minting session tokens outside the login flow,
//! for expiry and rotation scenarios.

use chrono::{Duration, Utc};
use common::jwt::SessionClaims;
use flix_service::crypto::{sign_session_jwt, SigningKey};

/// Builder for creating test session tokens
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_subject(&user.id.to_string())
///     .expired_since(3600)
///     .sign_with(&retired_signing_key());
/// ```
pub struct TestTokenBuilder {
    sub: String,
    exp: i64,
    iat: i64,
}

impl TestTokenBuilder {
    /// Create a new token builder with a one hour lifetime
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            sub: "test-subject".to_string(),
            exp: (now + Duration::seconds(3600)).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Set the subject (the stable user id)
    pub fn for_subject(mut self, subject: &str) -> Self {
        self.sub = subject.to_string();
        self
    }

    /// Set expiration in seconds from now
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = (Utc::now() + Duration::seconds(seconds)).timestamp();
        self
    }

    /// Expire the token `seconds_ago` in the past, with an iat one hour
    /// before that so the claims stay internally consistent
    pub fn expired_since(mut self, seconds_ago: i64) -> Self {
        let now = Utc::now().timestamp();
        self.exp = now - seconds_ago;
        self.iat = self.exp - 3600;
        self
    }

    /// Set issued-at timestamp
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.iat = timestamp;
        self
    }

    /// Build the claims without signing
    pub fn claims(&self) -> SessionClaims {
        SessionClaims::new(self.sub.clone(), self.exp, self.iat)
    }

    /// Sign the claims into a wire-format token
    pub fn sign_with(self, key: &SigningKey) -> String {
        sign_session_jwt(&self.claims(), key).expect("test token signing should not fail")
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}
