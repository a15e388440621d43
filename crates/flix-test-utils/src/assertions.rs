//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for session tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use serde::Deserialize;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: String,
    #[serde(default)]
    pub kid: Option<String>,
}

/// Session token claims structure
#[derive(Debug, Deserialize)]
struct JwtClaims {
    pub sub: String,
    pub exp: i64,
    #[expect(dead_code)] // Used for JWT structure validation but not accessed
    pub iat: i64,
}

/// Custom assertions for session tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_signed_by("test-key-2025-02")
///     .assert_for_subject(&user.id.to_string());
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a valid HS256 JWT with a key id
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token was signed by the specified key
    fn assert_signed_by(&self, key_id: &str) -> &Self;

    /// Assert that the token expires within the specified seconds
    fn assert_expires_within(&self, seconds: i64) -> &Self;

    /// Assert that the token is for the specified subject
    fn assert_for_subject(&self, subject: &str) -> &Self;
}

fn decode_header(token: &str) -> JwtHeader {
    let parts: Vec<_> = token.split('.').collect();
    assert_eq!(
        parts.len(),
        3,
        "JWT must have 3 parts (header.payload.signature), got {}",
        parts.len()
    );

    let header_bytes = URL_SAFE_NO_PAD
        .decode(parts[0])
        .expect("Failed to base64 decode JWT header");
    serde_json::from_slice(&header_bytes).expect("Failed to parse JWT header JSON")
}

fn decode_claims(token: &str) -> JwtClaims {
    let parts: Vec<_> = token.split('.').collect();
    assert_eq!(
        parts.len(),
        3,
        "JWT must have 3 parts (header.payload.signature), got {}",
        parts.len()
    );

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(parts[1])
        .expect("Failed to base64 decode JWT payload");
    serde_json::from_slice(&payload_bytes).expect("Failed to parse JWT claims JSON")
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let header = decode_header(self);
        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");
        assert!(header.kid.is_some(), "Token header must carry a key id");

        // Claims must parse too
        let _ = decode_claims(self);

        self
    }

    fn assert_signed_by(&self, key_id: &str) -> &Self {
        let header = decode_header(self);
        assert_eq!(
            header.kid.as_deref(),
            Some(key_id),
            "Token was not signed by key '{key_id}'"
        );

        self
    }

    fn assert_expires_within(&self, seconds: i64) -> &Self {
        let claims = decode_claims(self);
        let now = Utc::now().timestamp();

        assert!(
            claims.exp > now,
            "Token is already expired (exp {} <= now {})",
            claims.exp,
            now
        );
        assert!(
            claims.exp <= now + seconds,
            "Token expires too far in the future: exp {} > now + {seconds}",
            claims.exp
        );

        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.sub, subject,
            "Token subject mismatch: expected '{subject}', got '{}'",
            claims.sub
        );

        self
    }
}
