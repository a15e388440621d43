//! Domain services: credential verification, session tokens, account
//! management.
//!
//! Services are free functions that take their collaborators as arguments.
//! Storage calls on the request path go through [`bounded`] so a wedged
//! backend turns into a 503 instead of holding the request open.

pub mod auth_service;
pub mod catalog_service;
pub mod token_service;
pub mod user_service;

use crate::errors::FlixError;
use crate::store::LOOKUP_TIMEOUT;
use std::future::Future;

/// Bound a storage call to [`LOOKUP_TIMEOUT`], surfacing a timeout as
/// [`FlixError::StorageUnavailable`].
pub(crate) async fn bounded<T, F>(operation: &'static str, fut: F) -> Result<T, FlixError>
where
    F: Future<Output = Result<T, FlixError>>,
{
    match tokio::time::timeout(LOOKUP_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation,
                timeout_secs = LOOKUP_TIMEOUT.as_secs(),
                "Storage call timed out"
            );
            Err(FlixError::StorageUnavailable(format!(
                "{operation} timed out"
            )))
        }
    }
}
