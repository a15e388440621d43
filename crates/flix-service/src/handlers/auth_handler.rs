//! Login endpoint.

use crate::errors::FlixError;
use crate::models::{LoginRequest, LoginResponse, UserResponse};
use crate::observability::metrics::{record_error, record_login_attempt, record_token_issuance};
use crate::observability::{hash_for_correlation, ErrorCategory};
use crate::routes::AppState;
use crate::services::{auth_service, token_service};
use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Handle a login request.
///
/// POST /login
///
/// Verifies the presented credentials and, on success, returns the stored
/// account (without its credential hash) together with a freshly signed
/// session token. Every rejection renders the same 400 body; which factor
/// failed is recorded in logs only, keyed by a hashed username.
#[instrument(name = "flix.auth.login", skip_all, fields(status))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, FlixError> {
    let start = Instant::now();

    let result = login_internal(&state, &payload).await;

    let duration = start.elapsed();
    let status = if result.is_ok() { "success" } else { "error" };
    tracing::Span::current().record("status", status);
    record_login_attempt(status, duration);

    match result {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            let category = ErrorCategory::from(&e);
            record_error("login", category.as_str(), e.status_code());
            tracing::debug!(
                target: "flix.auth",
                username_hash = %hash_for_correlation(&payload.username),
                error = %e,
                "Login rejected"
            );
            Err(e)
        }
    }
}

async fn login_internal(
    state: &AppState,
    payload: &LoginRequest,
) -> Result<LoginResponse, FlixError> {
    let user = auth_service::verify_credentials(
        state.users.as_ref(),
        &payload.username,
        &payload.password,
    )
    .await?;

    let token = match token_service::issue_session_token(&user, &state.config) {
        Ok(token) => {
            record_token_issuance("success");
            token
        }
        Err(e) => {
            record_token_issuance("error");
            return Err(e);
        }
    };

    Ok(LoginResponse {
        user: UserResponse::from(user),
        token,
    })
}
