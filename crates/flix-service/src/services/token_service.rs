//! Session token issuance and validation.

use crate::config::Config;
use crate::crypto;
use crate::errors::FlixError;
use crate::models::User;
use crate::store::UserStore;
use chrono::Utc;
use common::jwt::SessionClaims;
use uuid::Uuid;

/// Issue a session token for an authenticated user.
///
/// The subject is the stable user id rather than the username, so a later
/// username change does not orphan outstanding tokens. Lifetime comes from
/// config (`token_ttl_secs`, default 7 days); the token is signed with the
/// keyring's active key.
pub fn issue_session_token(user: &User, config: &Config) -> Result<String, FlixError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims::new(user.id.to_string(), now + config.token_ttl_secs, now);

    crypto::sign_session_jwt(&claims, config.keyring.active())
}

/// Validate a presented token and resolve its subject to a live account.
///
/// Cheap checks run first (size, key id, signature, expiry, iat); storage is
/// only consulted once the token itself is good. A token whose subject no
/// longer resolves (account deleted after issuance) fails with
/// [`FlixError::UnknownIdentity`]; the auth middleware remaps that to a 401
/// so protected endpoints never answer 400 for token problems.
pub async fn validate_session_token(
    token: &str,
    users: &dyn UserStore,
    config: &Config,
) -> Result<User, FlixError> {
    let claims = crypto::verify_session_jwt(token, &config.keyring, config.jwt_clock_skew)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| FlixError::InvalidToken("subject is not a valid user id".to_string()))?;

    let user = super::bounded("user lookup by id", users.find_by_id(user_id)).await?;

    user.ok_or(FlixError::UnknownIdentity)
}
