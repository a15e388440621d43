//! In-memory storage backend.
//!
//! Backs the integration test harness and unit tests so the full request
//! path can run without a database. Failure injection knobs simulate a
//! slow or unavailable backend.

use super::{MovieCatalog, UserChanges, UserStore};
use crate::errors::FlixError;
use crate::models::{Director, Genre, Movie, User};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    movies: RwLock<Vec<Movie>>,
    /// When set, every storage call fails with `StorageUnavailable`.
    failing: AtomicBool,
    /// When set, every storage call sleeps first (timeout testing).
    lookup_delay: RwLock<Option<Duration>>,
    /// Number of storage calls made.
    lookup_count: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            movies: RwLock::new(Vec::new()),
            failing: AtomicBool::new(false),
            lookup_delay: RwLock::new(None),
            lookup_count: AtomicUsize::new(0),
        }
    }

    /// Create a store pre-seeded with a movie catalog.
    #[must_use]
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
            ..Self::new()
        }
    }

    /// Insert a user record directly, bypassing registration.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Toggle hard failure of every storage call.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delay every storage call by `delay` (or clear with `None`).
    pub async fn set_lookup_delay(&self, delay: Option<Duration>) {
        *self.lookup_delay.write().await = delay;
    }

    /// Number of storage calls made so far.
    pub fn lookup_count(&self) -> usize {
        self.lookup_count.load(Ordering::SeqCst)
    }

    async fn gate(&self) -> Result<(), FlixError> {
        self.lookup_count.fetch_add(1, Ordering::SeqCst);

        let delay = *self.lookup_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(FlixError::StorageUnavailable(
                "simulated storage outage".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, FlixError> {
        self.gate().await?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, FlixError> {
        self.gate().await?;
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
        birthday: Option<NaiveDate>,
    ) -> Result<User, FlixError> {
        self.gate().await?;
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == username) {
            return Err(FlixError::DuplicateUsername);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            email: email.to_string(),
            birthday,
            favorites: Vec::new(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, FlixError> {
        self.gate().await?;
        let mut users = self.users.write().await;

        if let Some(new_username) = &changes.username {
            let taken = users
                .values()
                .any(|u| u.id != id && u.username == *new_username);
            if taken {
                return Err(FlixError::DuplicateUsername);
            }
        }

        let user = users.get_mut(&id).ok_or(FlixError::NotFound("User"))?;

        if let Some(username) = changes.username {
            user.username = username;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(birthday) = changes.birthday {
            user.birthday = Some(birthday);
        }

        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), FlixError> {
        self.gate().await?;
        let mut users = self.users.write().await;
        users
            .remove(&id)
            .map(|_| ())
            .ok_or(FlixError::NotFound("User"))
    }

    async fn add_favorite(&self, id: Uuid, movie_id: Uuid) -> Result<User, FlixError> {
        self.gate().await?;
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(FlixError::NotFound("User"))?;

        if !user.favorites.contains(&movie_id) {
            user.favorites.push(movie_id);
        }

        Ok(user.clone())
    }

    async fn remove_favorite(&self, id: Uuid, movie_id: Uuid) -> Result<User, FlixError> {
        self.gate().await?;
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(FlixError::NotFound("User"))?;

        user.favorites.retain(|m| *m != movie_id);

        Ok(user.clone())
    }
}

#[async_trait::async_trait]
impl MovieCatalog for MemoryStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, FlixError> {
        self.gate().await?;
        let mut movies = self.movies.read().await.clone();
        movies.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(movies)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, FlixError> {
        self.gate().await?;
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.title == title).cloned())
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, FlixError> {
        self.gate().await?;
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .find(|m| m.genre.name == name)
            .map(|m| m.genre.clone()))
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>, FlixError> {
        self.gate().await?;
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .find(|m| m.director.name == name)
            .map(|m| m.director.clone()))
    }

    async fn movie_exists(&self, id: Uuid) -> Result<bool, FlixError> {
        self.gate().await?;
        let movies = self.movies.read().await;
        Ok(movies.iter().any(|m| m.id == id))
    }
}
