//! Account management: registration, profile updates, deletion, favorites.
//!
//! Mutating operations are owner-gated: the authenticated user may only
//! manage the account named in the path. Validation failures collect every
//! offending field so clients can fix a form in one round trip.

use crate::crypto;
use crate::errors::FlixError;
use crate::models::{RegisterRequest, UpdateUserRequest, User};
use crate::store::{MovieCatalog, UserChanges, UserStore};
use common::secret::{ExposeSecret, SecretString};
use uuid::Uuid;

const MIN_USERNAME_LENGTH: usize = 5;
const MIN_PASSWORD_LENGTH: usize = 8;

fn validate_username(username: &str, errors: &mut Vec<String>) {
    if username.len() < MIN_USERNAME_LENGTH {
        errors.push(format!(
            "username must be at least {MIN_USERNAME_LENGTH} characters"
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push("username must contain only alphanumeric characters".to_string());
    }
}

fn validate_password(password: &SecretString, errors: &mut Vec<String>) {
    if password.expose_secret().len() < MIN_PASSWORD_LENGTH {
        errors.push(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }
}

fn validate_email(email: &str, errors: &mut Vec<String>) {
    if !is_valid_email(email) {
        errors.push("email does not appear to be valid".to_string());
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Register a new account.
///
/// Validates every field before touching storage and reports all failures
/// at once. The password is hashed here; plaintext never reaches the store.
pub async fn register(
    users: &dyn UserStore,
    request: RegisterRequest,
    bcrypt_cost: u32,
) -> Result<User, FlixError> {
    let mut errors = Vec::new();
    validate_username(&request.username, &mut errors);
    validate_password(&request.password, &mut errors);
    validate_email(&request.email, &mut errors);
    if !errors.is_empty() {
        return Err(FlixError::Validation(errors));
    }

    let password_hash = crypto::hash_password(request.password.expose_secret(), bcrypt_cost)?;

    super::bounded(
        "user creation",
        users.create_user(
            &request.username,
            &password_hash,
            &request.email,
            request.birthday,
        ),
    )
    .await
}

/// Fetch the requester's own account record from storage.
pub async fn get_account(
    users: &dyn UserStore,
    requester: &User,
    target_username: &str,
) -> Result<User, FlixError> {
    if requester.username != target_username {
        return Err(FlixError::Forbidden);
    }

    super::bounded(
        "user lookup by username",
        users.find_by_username(target_username),
    )
    .await?
    .ok_or(FlixError::NotFound("User"))
}

/// Update the requester's own account. Fields left out of the request keep
/// their current values; a new password is re-hashed before storage.
pub async fn update_account(
    users: &dyn UserStore,
    requester: &User,
    target_username: &str,
    request: UpdateUserRequest,
    bcrypt_cost: u32,
) -> Result<User, FlixError> {
    if requester.username != target_username {
        return Err(FlixError::Forbidden);
    }

    let mut errors = Vec::new();
    if let Some(username) = &request.username {
        validate_username(username, &mut errors);
    }
    if let Some(password) = &request.password {
        validate_password(password, &mut errors);
    }
    if let Some(email) = &request.email {
        validate_email(email, &mut errors);
    }
    if !errors.is_empty() {
        return Err(FlixError::Validation(errors));
    }

    let password_hash = match &request.password {
        Some(password) => Some(crypto::hash_password(password.expose_secret(), bcrypt_cost)?),
        None => None,
    };

    let changes = UserChanges {
        username: request.username,
        password_hash,
        email: request.email,
        birthday: request.birthday,
    };

    super::bounded("user update", users.update_user(requester.id, changes)).await
}

/// Delete the requester's own account.
pub async fn delete_account(
    users: &dyn UserStore,
    requester: &User,
    target_username: &str,
) -> Result<(), FlixError> {
    if requester.username != target_username {
        return Err(FlixError::Forbidden);
    }

    super::bounded("user deletion", users.delete_user(requester.id)).await
}

/// Add a movie to the requester's favorites. The movie must exist; adding
/// one that is already listed is a no-op.
pub async fn add_favorite(
    users: &dyn UserStore,
    movies: &dyn MovieCatalog,
    requester: &User,
    target_username: &str,
    movie_id: Uuid,
) -> Result<User, FlixError> {
    if requester.username != target_username {
        return Err(FlixError::Forbidden);
    }

    let exists = super::bounded("movie existence check", movies.movie_exists(movie_id)).await?;
    if !exists {
        return Err(FlixError::NotFound("Movie"));
    }

    super::bounded(
        "favorite addition",
        users.add_favorite(requester.id, movie_id),
    )
    .await
}

/// Remove a movie from the requester's favorites. Removing an id that is
/// not listed is a no-op.
pub async fn remove_favorite(
    users: &dyn UserStore,
    requester: &User,
    target_username: &str,
    movie_id: Uuid,
) -> Result<User, FlixError> {
    if requester.username != target_username {
        return Err(FlixError::Forbidden);
    }

    super::bounded(
        "favorite removal",
        users.remove_favorite(requester.id, movie_id),
    )
    .await
}
