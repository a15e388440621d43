//! Account endpoints: registration, profile reads and updates, favorites.
//!
//! Everything except registration sits behind the auth middleware and is
//! owner-gated in the service layer.

use crate::errors::FlixError;
use crate::middleware::AuthenticatedUser;
use crate::models::{RegisterRequest, UpdateUserRequest, UserResponse};
use crate::observability::metrics::{record_error, record_registration};
use crate::observability::ErrorCategory;
use crate::routes::AppState;
use crate::services::user_service;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;
use uuid::Uuid;

/// Handle account registration.
///
/// POST /users
#[instrument(name = "flix.users.register", skip_all, fields(status))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), FlixError> {
    let start = Instant::now();

    let result =
        user_service::register(state.users.as_ref(), payload, state.config.bcrypt_cost).await;

    let duration = start.elapsed();
    let status = if result.is_ok() { "success" } else { "error" };
    tracing::Span::current().record("status", status);
    record_registration(status, duration);

    match result {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserResponse::from(user)))),
        Err(e) => {
            record_error("register", ErrorCategory::from(&e).as_str(), e.status_code());
            Err(e)
        }
    }
}

/// Fetch the authenticated user's own account.
///
/// GET /users/:username
#[instrument(name = "flix.users.get", skip_all)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(requester)): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, FlixError> {
    let user = user_service::get_account(state.users.as_ref(), &requester, &username).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the authenticated user's own account.
///
/// PUT /users/:username
#[instrument(name = "flix.users.update", skip_all)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(requester)): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, FlixError> {
    let user = user_service::update_account(
        state.users.as_ref(),
        &requester,
        &username,
        payload,
        state.config.bcrypt_cost,
    )
    .await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete the authenticated user's own account.
///
/// DELETE /users/:username
#[instrument(name = "flix.users.delete", skip_all)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(requester)): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
) -> Result<StatusCode, FlixError> {
    user_service::delete_account(state.users.as_ref(), &requester, &username).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a movie to the authenticated user's favorites.
///
/// POST /users/:username/favorites/:movie_id
#[instrument(name = "flix.users.add_favorite", skip_all)]
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(requester)): Extension<AuthenticatedUser>,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> Result<Json<UserResponse>, FlixError> {
    let user = user_service::add_favorite(
        state.users.as_ref(),
        state.movies.as_ref(),
        &requester,
        &username,
        movie_id,
    )
    .await?;
    Ok(Json(UserResponse::from(user)))
}

/// Remove a movie from the authenticated user's favorites.
///
/// DELETE /users/:username/favorites/:movie_id
#[instrument(name = "flix.users.remove_favorite", skip_all)]
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(requester)): Extension<AuthenticatedUser>,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> Result<Json<UserResponse>, FlixError> {
    let user = user_service::remove_favorite(
        state.users.as_ref(),
        &requester,
        &username,
        movie_id,
    )
    .await?;
    Ok(Json(UserResponse::from(user)))
}
