//! Read-only movie catalog lookups.
//!
//! All lookups are exact-match on the natural key. Absence is a plain
//! not-found; there is no enumeration concern on catalog data.

use crate::errors::FlixError;
use crate::models::{Director, Genre, Movie};
use crate::store::MovieCatalog;

pub async fn list_movies(movies: &dyn MovieCatalog) -> Result<Vec<Movie>, FlixError> {
    super::bounded("movie listing", movies.list_movies()).await
}

pub async fn get_movie_by_title(
    movies: &dyn MovieCatalog,
    title: &str,
) -> Result<Movie, FlixError> {
    super::bounded("movie lookup by title", movies.find_by_title(title))
        .await?
        .ok_or(FlixError::NotFound("Movie"))
}

pub async fn get_genre_by_name(
    movies: &dyn MovieCatalog,
    name: &str,
) -> Result<Genre, FlixError> {
    super::bounded("genre lookup", movies.find_genre(name))
        .await?
        .ok_or(FlixError::NotFound("Genre"))
}

pub async fn get_director_by_name(
    movies: &dyn MovieCatalog,
    name: &str,
) -> Result<Director, FlixError> {
    super::bounded("director lookup", movies.find_director(name))
        .await?
        .ok_or(FlixError::NotFound("Director"))
}
