use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Public message for every credential rejection at the login boundary.
///
/// Unknown-username and wrong-password rejections must be byte-identical to
/// the client so the login endpoint cannot be used to enumerate usernames.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Public message for every token rejection at the request boundary.
///
/// Missing, malformed, forged, and expired tokens all read the same from the
/// outside; the distinction lives in logs and metrics only.
pub const INVALID_TOKEN_MESSAGE: &str = "The access token is invalid or expired";

#[derive(Debug, Error)]
pub enum FlixError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    /// No identity record for the claimed username.
    ///
    /// Login-path rejection. On the token-validation path the bearer
    /// middleware remaps subject-resolution misses to `InvalidToken` so a
    /// protected endpoint always answers 401, never 400.
    #[error("Unknown identity")]
    UnknownIdentity,

    /// Identity exists but the presented secret does not match its hash.
    #[error("Bad secret")]
    BadSecret,

    #[error("Missing bearer token")]
    MissingToken,

    /// The inner reason (bad signature, unknown kid, malformed structure,
    /// vanished subject) is for diagnostics only and never leaves the server.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    Expired,

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Authenticated, but acting on an account that is not the caller's own.
    #[error("Forbidden")]
    Forbidden,

    #[error("Internal server error")]
    Internal,
}

impl FlixError {
    /// HTTP status this error renders as. Also feeds the `status_code`
    /// metric label, so it must stay in lockstep with `into_response`.
    pub fn status_code(&self) -> u16 {
        match self {
            FlixError::Database(_) | FlixError::Crypto(_) | FlixError::Internal => 500,
            FlixError::StorageUnavailable(_) => 503,
            FlixError::UnknownIdentity | FlixError::BadSecret => 400,
            FlixError::MissingToken | FlixError::InvalidToken(_) | FlixError::Expired => 401,
            FlixError::Validation(_) => 422,
            FlixError::DuplicateUsername => 409,
            FlixError::NotFound(_) => 404,
            FlixError::Forbidden => 403,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for FlixError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let (code, message, details) = match &self {
            FlixError::Database(_) => (
                "DATABASE_ERROR",
                "An internal database error occurred".to_string(),
                None,
            ),
            FlixError::StorageUnavailable(_) => (
                "STORAGE_UNAVAILABLE",
                "The service is temporarily unavailable".to_string(),
                None,
            ),
            FlixError::Crypto(_) => (
                "CRYPTO_ERROR",
                "An internal cryptographic error occurred".to_string(),
                None,
            ),
            FlixError::UnknownIdentity | FlixError::BadSecret => (
                "INVALID_CREDENTIALS",
                INVALID_CREDENTIALS_MESSAGE.to_string(),
                None,
            ),
            FlixError::MissingToken | FlixError::InvalidToken(_) | FlixError::Expired => {
                ("UNAUTHORIZED", INVALID_TOKEN_MESSAGE.to_string(), None)
            }
            FlixError::Validation(problems) => (
                "VALIDATION_FAILED",
                "One or more fields are invalid".to_string(),
                Some(problems.clone()),
            ),
            FlixError::DuplicateUsername => (
                "USERNAME_TAKEN",
                "Username is already taken".to_string(),
                None,
            ),
            FlixError::NotFound(what) => ("NOT_FOUND", format!("{what} not found"), None),
            FlixError::Forbidden => (
                "FORBIDDEN",
                "You can only manage your own account".to_string(),
                None,
            ),
            FlixError::Internal => (
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
                None,
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(error_response)).into_response()
    }
}
