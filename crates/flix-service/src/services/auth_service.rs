//! Credential verification.
//!
//! Checks a username/password pair against stored bcrypt hashes. Unknown
//! usernames and wrong passwords stay distinguishable here for logging and
//! metrics; the HTTP boundary collapses both into one generic response.

use crate::crypto;
use crate::errors::FlixError;
use crate::models::User;
use crate::store::UserStore;
use common::secret::{ExposeSecret, SecretString};

/// Dummy bcrypt hash (cost 12) verified when the username does not resolve,
/// so unknown-username attempts cost the same as wrong-password attempts.
const DUMMY_PASSWORD_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a";

/// Verify a username/password pair against stored credentials.
///
/// The username lookup is exact and case-sensitive. On success the full
/// stored record is returned; callers decide what is safe to expose (the
/// HTTP layer serializes through a hash-free response type).
///
/// Verification has no side effects: no lockout counters, no last-login
/// writes.
///
/// # Errors
///
/// - [`FlixError::UnknownIdentity`] if no account has this username
/// - [`FlixError::BadSecret`] if the password does not match
/// - [`FlixError::StorageUnavailable`] if the lookup times out or the
///   backend is down
pub async fn verify_credentials(
    users: &dyn UserStore,
    username: &str,
    password: &SecretString,
) -> Result<User, FlixError> {
    let user = super::bounded("user lookup by username", users.find_by_username(username)).await?;

    // Always run bcrypt to prevent timing-based username enumeration.
    // Use the dummy hash when the account does not exist.
    let hash_to_verify = match &user {
        Some(u) => u.password_hash.as_str(),
        None => DUMMY_PASSWORD_HASH,
    };

    let is_valid = crypto::verify_password(password.expose_secret(), hash_to_verify)?;

    let Some(user) = user else {
        tracing::debug!(target: "auth", "Login failed: unknown username");
        return Err(FlixError::UnknownIdentity);
    };

    if !is_valid {
        tracing::debug!(target: "auth", user_id = %user.id, "Login failed: wrong password");
        return Err(FlixError::BadSecret);
    }

    Ok(user)
}
