use crate::config::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::errors::FlixError;
use crate::observability::metrics::record_token_validation;
use common::jwt::{self, SessionClaims, MAX_JWT_SIZE_BYTES};
use common::secret::{ExposeSecret, SecretBox};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use std::time::Duration;
use tracing::instrument;

/// A single HMAC signing key with its stable identifier.
///
/// The `kid` travels in the JWT header so validation can select the right
/// key during rotation. The secret itself is wrapped in `SecretBox` and
/// never appears in logs or debug output.
pub struct SigningKey {
    pub kid: String,
    pub secret: SecretBox<Vec<u8>>,
}

impl SigningKey {
    #[must_use]
    pub fn new(kid: String, secret: Vec<u8>) -> Self {
        Self {
            kid,
            secret: SecretBox::new(Box::new(secret)),
        }
    }
}

impl Clone for SigningKey {
    fn clone(&self) -> Self {
        Self {
            kid: self.kid.clone(),
            secret: SecretBox::new(Box::new(self.secret.expose_secret().clone())),
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("kid", &self.kid)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Ordered set of signing keys: the active key signs new tokens, retired
/// keys remain valid for verification until their tokens age out.
///
/// Non-emptiness is guaranteed by construction: there is always an active
/// key.
#[derive(Debug, Clone)]
pub struct Keyring {
    active: SigningKey,
    retired: Vec<SigningKey>,
}

impl Keyring {
    #[must_use]
    pub fn new(active: SigningKey, retired: Vec<SigningKey>) -> Self {
        Self { active, retired }
    }

    /// The key used to sign newly-issued tokens.
    #[must_use]
    pub fn active(&self) -> &SigningKey {
        &self.active
    }

    /// Look up a key by id, checking the active key first.
    #[must_use]
    pub fn find(&self, kid: &str) -> Option<&SigningKey> {
        if self.active.kid == kid {
            return Some(&self.active);
        }
        self.retired.iter().find(|k| k.kid == kid)
    }

    /// Key ids in precedence order, for startup logging.
    #[must_use]
    pub fn key_ids(&self) -> Vec<&str> {
        std::iter::once(self.active.kid.as_str())
            .chain(self.retired.iter().map(|k| k.kid.as_str()))
            .collect()
    }
}

/// Sign session claims with the given key (HS256).
///
/// The key id is embedded in the JWT header so that validation can find the
/// matching key even after a rotation.
#[instrument(skip_all)]
pub fn sign_session_jwt(claims: &SessionClaims, key: &SigningKey) -> Result<String, FlixError> {
    let encoding_key = EncodingKey::from_secret(key.secret.expose_secret());

    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());
    header.kid = Some(key.kid.clone());

    let token = encode(&header, claims, &encoding_key)
        .map_err(|e| FlixError::Crypto(format!("JWT signing operation failed: {e}")))?;

    Ok(token)
}

/// Verify a session token against the keyring.
///
/// Validates, in order:
/// - Token size (must be <= `MAX_JWT_SIZE_BYTES`, checked BEFORE any parsing)
/// - `kid` header resolves to a configured key
/// - Signature (HS256 with the resolved key)
/// - Expiration (`exp` claim)
/// - Issued-at (`iat` claim) within clock skew tolerance
///
/// Expired tokens surface as [`FlixError::Expired`]; every other rejection is
/// [`FlixError::InvalidToken`] with a diagnostics-only reason. Both map to the
/// same response body at the HTTP boundary.
#[instrument(skip_all)]
pub fn verify_session_jwt(
    token: &str,
    keyring: &Keyring,
    clock_skew: Duration,
) -> Result<SessionClaims, FlixError> {
    // Size check runs before base64 decode or signature work so oversized
    // garbage costs nothing.
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "crypto",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(FlixError::InvalidToken(
            "token exceeds size limit".to_string(),
        ));
    }

    let kid = jwt::extract_kid(token).map_err(|e| {
        tracing::debug!(target: "crypto", error = %e, "Token rejected: unusable header");
        FlixError::InvalidToken("unusable token header".to_string())
    })?;

    let key = keyring.find(&kid).ok_or_else(|| {
        tracing::debug!(target: "crypto", "Token rejected: key id not in keyring");
        FlixError::InvalidToken("unknown key id".to_string())
    })?;

    let decoding_key = DecodingKey::from_secret(key.secret.expose_secret());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<SessionClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(target: "crypto", error = %e, "Token verification failed");
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => FlixError::Expired,
            _ => FlixError::InvalidToken(format!("signature verification failed: {e}")),
        }
    })?;

    // Reject iat too far in the future (pre-generated or clock-drifted token)
    if let Err(e) = jwt::validate_iat(token_data.claims.iat, clock_skew) {
        record_token_validation("error", Some("clock_skew"));
        return Err(FlixError::InvalidToken(e.to_string()));
    }

    Ok(token_data.claims)
}

/// Hash a password with bcrypt using a configurable cost factor.
///
/// # Security
///
/// - Cost < 10 is insecure per OWASP 2024 guidelines
/// - Cost > 14 causes excessive login latency (~800ms+)
///
/// # Errors
///
/// Returns `FlixError::Crypto` if the cost is outside the valid range
/// (defense-in-depth; config validates too) or if hashing itself fails.
#[instrument(skip_all)]
pub fn hash_password(password: &str, cost: u32) -> Result<String, FlixError> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(FlixError::Crypto(format!(
            "Invalid bcrypt cost: {cost} (must be {MIN_BCRYPT_COST}-{MAX_BCRYPT_COST})"
        )));
    }

    bcrypt::hash(password, cost)
        .map_err(|e| FlixError::Crypto(format!("Password hashing failed: {e}")))
}

/// Verify a password against a stored bcrypt hash.
///
/// bcrypt's verify routine is the constant-time comparison for this scheme;
/// callers never compare hash strings directly.
#[instrument(skip_all)]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, FlixError> {
    bcrypt::verify(password, hash)
        .map_err(|e| FlixError::Crypto(format!("Password verification failed: {e}")))
}
