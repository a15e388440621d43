//! Postgres-backed storage.
//!
//! Thin SQL layer: one query per trait method, no caching. Schema is managed
//! out of band; queries list their columns explicitly so a schema drift shows
//! up as a decode error rather than silently reordered fields.

use super::{MovieCatalog, UserChanges, UserStore};
use crate::errors::FlixError;
use crate::models::{Director, Genre, Movie, User};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, password_hash, email, birthday, favorites, created_at";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Movie row as stored (genre and director columns are flattened).
#[derive(sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    description: String,
    genre_name: String,
    genre_description: String,
    director_name: String,
    director_bio: String,
    director_birth: Option<NaiveDate>,
    director_death: Option<NaiveDate>,
    actors: Vec<String>,
    image_path: Option<String>,
    featured: bool,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            description: row.description,
            genre: Genre {
                name: row.genre_name,
                description: row.genre_description,
            },
            director: Director {
                name: row.director_name,
                bio: row.director_bio,
                birth: row.director_birth,
                death: row.director_death,
            },
            actors: row.actors,
            image_path: row.image_path,
            featured: row.featured,
        }
    }
}

const MOVIE_COLUMNS: &str = "id, title, description, genre_name, genre_description, \
     director_name, director_bio, director_birth, director_death, \
     actors, image_path, featured";

fn is_username_conflict(e: &sqlx::Error) -> bool {
    e.to_string().contains("users_username_key")
}

#[async_trait::async_trait]
impl UserStore for PgStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, FlixError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FlixError::Database(format!("Failed to fetch user by username: {e}")))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, FlixError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FlixError::Database(format!("Failed to fetch user by id: {e}")))?;

        Ok(user)
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
        birthday: Option<NaiveDate>,
    ) -> Result<User, FlixError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password_hash, email, birthday) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(birthday)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_username_conflict(&e) {
                FlixError::DuplicateUsername
            } else {
                FlixError::Database(format!("Failed to create user: {e}"))
            }
        })?;

        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<User, FlixError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                 username = COALESCE($2, username), \
                 password_hash = COALESCE($3, password_hash), \
                 email = COALESCE($4, email), \
                 birthday = COALESCE($5, birthday) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.username)
        .bind(changes.password_hash)
        .bind(changes.email)
        .bind(changes.birthday)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_username_conflict(&e) {
                FlixError::DuplicateUsername
            } else {
                FlixError::Database(format!("Failed to update user: {e}"))
            }
        })?;

        user.ok_or(FlixError::NotFound("User"))
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), FlixError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| FlixError::Database(format!("Failed to delete user: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(FlixError::NotFound("User"));
        }

        Ok(())
    }

    async fn add_favorite(&self, id: Uuid, movie_id: Uuid) -> Result<User, FlixError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET favorites = CASE \
                 WHEN favorites @> ARRAY[$2]::uuid[] THEN favorites \
                 ELSE array_append(favorites, $2) \
             END \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FlixError::Database(format!("Failed to add favorite: {e}")))?;

        user.ok_or(FlixError::NotFound("User"))
    }

    async fn remove_favorite(&self, id: Uuid, movie_id: Uuid) -> Result<User, FlixError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET favorites = array_remove(favorites, $2) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FlixError::Database(format!("Failed to remove favorite: {e}")))?;

        user.ok_or(FlixError::NotFound("User"))
    }
}

#[async_trait::async_trait]
impl MovieCatalog for PgStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, FlixError> {
        let rows = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FlixError::Database(format!("Failed to list movies: {e}")))?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, FlixError> {
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE title = $1"
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FlixError::Database(format!("Failed to fetch movie by title: {e}")))?;

        Ok(row.map(Movie::from))
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, FlixError> {
        let row: Option<(String, String)> = sqlx::query_as(
            "SELECT genre_name, genre_description FROM movies WHERE genre_name = $1 LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FlixError::Database(format!("Failed to fetch genre: {e}")))?;

        Ok(row.map(|(name, description)| Genre { name, description }))
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>, FlixError> {
        let row: Option<(String, String, Option<NaiveDate>, Option<NaiveDate>)> = sqlx::query_as(
            "SELECT director_name, director_bio, director_birth, director_death \
             FROM movies WHERE director_name = $1 LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FlixError::Database(format!("Failed to fetch director: {e}")))?;

        Ok(row.map(|(name, bio, birth, death)| Director {
            name,
            bio,
            birth,
            death,
        }))
    }

    async fn movie_exists(&self, id: Uuid) -> Result<bool, FlixError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| FlixError::Database(format!("Failed to check movie existence: {e}")))?;

        Ok(exists.0)
    }
}
