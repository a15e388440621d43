//! Authentication middleware for protected routes.
//!
//! Extracts the Bearer token from the Authorization header, validates it
//! against the signing keyring, resolves the subject to a stored user, and
//! injects [`AuthenticatedUser`] into request extensions for handlers.

use crate::errors::FlixError;
use crate::models::User;
use crate::routes::AppState;
use crate::services::token_service;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::instrument;

/// Identity attached to the request after successful token validation.
///
/// Handlers behind [`require_auth`] read this via `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Extract Bearer token from the Authorization header.
fn extract_bearer_token(req: &Request) -> Result<&str, FlixError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!(target: "flix.middleware.auth", "Missing Authorization header");
            FlixError::MissingToken
        })?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::debug!(
            target: "flix.middleware.auth",
            "Authorization header is not a Bearer token"
        );
        FlixError::MissingToken
    })
}

/// Authentication middleware for session tokens.
///
/// # Response
///
/// - Returns 401 Unauthorized if the token is missing, invalid, or expired
/// - Returns 503 Service Unavailable if subject resolution times out
/// - Continues to the next handler with `AuthenticatedUser` in extensions otherwise
#[instrument(skip_all, name = "flix.middleware.auth")]
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, FlixError> {
    let token = extract_bearer_token(&req)?;

    let user = token_service::validate_session_token(token, state.users.as_ref(), &state.config)
        .await
        .map_err(|err| match err {
            // A subject that no longer resolves is indistinguishable from a
            // forged one at this boundary. Storage faults pass through as 503.
            FlixError::UnknownIdentity => {
                tracing::debug!(
                    target: "flix.middleware.auth",
                    "Token subject no longer resolves to a stored user"
                );
                FlixError::InvalidToken("token subject no longer resolves".to_string())
            }
            other => other,
        })?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}
