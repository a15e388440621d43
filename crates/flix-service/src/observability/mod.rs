//! Observability for the myFlix API.
//!
//! # Privacy by Default
//!
//! All instrumentation uses `#[instrument(skip_all)]` and explicit safe field allow-listing.
//! Fields are categorized as:
//! - **SAFE**: Can be logged in plaintext (enums, operation types, movie titles)
//! - **HASHED**: Must be SHA-256 hashed for correlation (usernames on failure paths)
//! - **NEVER**: Must never appear in logs (passwords, password hashes, tokens, signing keys)

pub mod metrics;

use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// Used for fields like `username` that need correlation across log entries
/// but should not be stored in plaintext.
///
/// # Privacy
///
/// This is NOT cryptographically secure for secrets - it's a one-way hash
/// for correlation purposes only. The truncation to 8 chars provides
/// sufficient uniqueness for debugging while limiting reversibility.
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    // Take first 8 hex chars (32 bits) - enough for correlation, limits reversibility
    hex::encode(&result[..4])
}

/// Error categories for metrics labels (bounded cardinality)
///
/// Maps internal error types to 5 categories so the `error_category` label
/// never grows with the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Authentication failures (unknown identity, bad password, missing token)
    Authentication,
    /// Authorization failures (acting on another user's account)
    Authorization,
    /// Cryptographic errors (invalid token, signature, hashing)
    Cryptographic,
    /// Client request errors (validation, conflicts, missing resources)
    InvalidRequest,
    /// Internal errors (database, storage timeouts, system)
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::Authorization => "authorization",
            ErrorCategory::Cryptographic => "cryptographic",
            ErrorCategory::InvalidRequest => "invalid_request",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl From<&crate::errors::FlixError> for ErrorCategory {
    fn from(err: &crate::errors::FlixError) -> Self {
        use crate::errors::FlixError;
        match err {
            FlixError::UnknownIdentity | FlixError::BadSecret | FlixError::MissingToken => {
                ErrorCategory::Authentication
            }
            FlixError::Forbidden => ErrorCategory::Authorization,
            FlixError::InvalidToken(_) | FlixError::Expired | FlixError::Crypto(_) => {
                ErrorCategory::Cryptographic
            }
            FlixError::Validation(_) | FlixError::DuplicateUsername | FlixError::NotFound(_) => {
                ErrorCategory::InvalidRequest
            }
            FlixError::Database(_) | FlixError::StorageUnavailable(_) | FlixError::Internal => {
                ErrorCategory::Internal
            }
        }
    }
}
