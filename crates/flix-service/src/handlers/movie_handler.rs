//! Movie catalog endpoints. Read-only, all behind the auth middleware.

use crate::errors::FlixError;
use crate::models::{Director, Genre, Movie};
use crate::routes::AppState;
use crate::services::catalog_service;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

/// List every movie in the catalog.
///
/// GET /movies
#[instrument(name = "flix.movies.list", skip_all)]
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Movie>>, FlixError> {
    let movies = catalog_service::list_movies(state.movies.as_ref()).await?;
    Ok(Json(movies))
}

/// Fetch a single movie by exact title.
///
/// GET /movies/:title
#[instrument(name = "flix.movies.get", skip_all)]
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Json<Movie>, FlixError> {
    let movie = catalog_service::get_movie_by_title(state.movies.as_ref(), &title).await?;
    Ok(Json(movie))
}

/// Fetch a genre description by exact name.
///
/// GET /movies/genres/:name
#[instrument(name = "flix.movies.genre", skip_all)]
pub async fn get_genre(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Genre>, FlixError> {
    let genre = catalog_service::get_genre_by_name(state.movies.as_ref(), &name).await?;
    Ok(Json(genre))
}

/// Fetch a director biography by exact name.
///
/// GET /movies/directors/:name
#[instrument(name = "flix.movies.director", skip_all)]
pub async fn get_director(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Director>, FlixError> {
    let director = catalog_service::get_director_by_name(state.movies.as_ref(), &name).await?;
    Ok(Json(director))
}
