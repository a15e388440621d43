//! Storage access for user accounts and the movie catalog.
//!
//! Handlers and services depend on the [`UserStore`] and [`MovieCatalog`]
//! traits rather than a concrete backend. Production wires in
//! [`PgStore`](postgres::PgStore); tests use
//! [`MemoryStore`](memory::MemoryStore), which needs no running database.
//!
//! Every trait method is a single awaited lookup or mutation. Callers in the
//! service layer bound each call with [`LOOKUP_TIMEOUT`] so a wedged backend
//! surfaces as 503 instead of hanging the request.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::errors::FlixError;
use crate::models::{Director, Genre, Movie, User};
use chrono::NaiveDate;
use std::time::Duration;
use uuid::Uuid;

/// Upper bound on any single storage call made on the request path.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Field updates for [`UserStore::update_user`]. `None` leaves a field
/// unchanged.
#[derive(Debug, Default, Clone)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// User account storage.
///
/// Username lookups are exact and case-sensitive: `Alice` and `alice` are
/// different accounts.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by exact username. `Ok(None)` means no such account.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, FlixError>;

    /// Fetch a user by stable id (the token subject).
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, FlixError>;

    /// Insert a new account. Fails with [`FlixError::DuplicateUsername`] if
    /// the username is taken.
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
        birthday: Option<NaiveDate>,
    ) -> Result<User, FlixError>;

    /// Apply partial updates to an account, returning the updated record.
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, FlixError>;

    /// Remove an account. Fails with [`FlixError::NotFound`] if it does not
    /// exist.
    async fn delete_user(&self, id: Uuid) -> Result<(), FlixError>;

    /// Add a movie to the user's favorites. Idempotent: adding an id that is
    /// already present leaves the list unchanged.
    async fn add_favorite(&self, id: Uuid, movie_id: Uuid) -> Result<User, FlixError>;

    /// Remove a movie from the user's favorites. Removing an id that is not
    /// present leaves the list unchanged.
    async fn remove_favorite(&self, id: Uuid, movie_id: Uuid) -> Result<User, FlixError>;
}

/// Read-only movie catalog storage.
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<Movie>, FlixError>;

    /// Fetch a movie by exact title.
    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, FlixError>;

    /// Fetch genre details by exact genre name.
    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, FlixError>;

    /// Fetch director details by exact director name.
    async fn find_director(&self, name: &str) -> Result<Option<Director>, FlixError>;

    /// Whether a movie with this id exists (favorites validation).
    async fn movie_exists(&self, id: Uuid) -> Result<bool, FlixError>;
}
