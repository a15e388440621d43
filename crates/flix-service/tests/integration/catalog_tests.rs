//! E2E tests for the movie catalog endpoints.
//!
//! Catalog reads are authenticated but not owner-gated: any live session
//! can browse movies, genres, and directors. Lookups are exact and
//! case-sensitive; misses return 404.
//!
//! ## Test Naming
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use flix_test_utils::{TestServer, TEST_MOVIE_INCEPTION};
use reqwest::StatusCode;

/// Register an account and return (server, token).
async fn server_with_session() -> Result<(TestServer, String), anyhow::Error> {
    let server = TestServer::spawn().await?;
    server
        .register_user("aliceflix", "hunter2pass", "alice@example.com")
        .await?;
    let token = server.login_token("aliceflix", "hunter2pass").await?;
    Ok((server, token))
}

// ============================================================================
// Movie Listing Tests (2 tests)
// ============================================================================

/// Test that the catalog listing returns every seeded movie, ordered by
/// title.
#[tokio::test]
async fn test_list_movies_returns_seeded_catalog() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_session().await?;

    let response = server.get_authed("/movies", &token).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    let movies = body.as_array().expect("Listing should be an array");

    let titles: Vec<_> = movies
        .iter()
        .filter_map(|m| m["title"].as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Alien", "Inception", "Seven Samurai"],
        "Listing should be ordered by title"
    );

    Ok(())
}

/// Test that listing requires a session.
#[tokio::test]
async fn test_list_movies_without_token_returns_401() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/movies", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

// ============================================================================
// Single Movie Tests (3 tests)
// ============================================================================

/// Test that a title lookup returns the complete movie record.
#[tokio::test]
async fn test_get_movie_by_title_returns_full_record() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_session().await?;

    let response = server.get_authed("/movies/Inception", &token).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;

    assert_eq!(
        body["id"].as_str(),
        Some(TEST_MOVIE_INCEPTION.to_string().as_str())
    );
    assert_eq!(body["title"].as_str(), Some("Inception"));
    assert_eq!(body["genre"]["name"].as_str(), Some("Thriller"));
    assert_eq!(body["director"]["name"].as_str(), Some("Christopher Nolan"));
    assert!(
        body["actors"]
            .as_array()
            .is_some_and(|actors| !actors.is_empty()),
        "Record should list its actors"
    );
    assert_eq!(body["featured"].as_bool(), Some(true));

    Ok(())
}

/// Test that an unknown title returns 404.
#[tokio::test]
async fn test_get_unknown_movie_returns_404() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_session().await?;

    let response = server.get_authed("/movies/Nonexistent", &token).await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

/// Test that title matching is exact and case-sensitive.
#[tokio::test]
async fn test_movie_title_lookup_is_case_sensitive() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_session().await?;

    let response = server.get_authed("/movies/inception", &token).await?;

    assert_eq!(
        response.status(),
        StatusCode::NOT_FOUND,
        "Lookups must not case-fold titles"
    );
    Ok(())
}

// ============================================================================
// Genre Tests (2 tests)
// ============================================================================

/// Test that a genre lookup returns the name and description.
#[tokio::test]
async fn test_get_genre_by_name_returns_description() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_session().await?;

    let response = server.get_authed("/movies/genres/Horror", &token).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["name"].as_str(), Some("Horror"));
    assert!(
        body["description"]
            .as_str()
            .is_some_and(|d| !d.is_empty()),
        "Genre should carry its description"
    );

    Ok(())
}

/// Test that an unknown genre returns 404.
#[tokio::test]
async fn test_get_unknown_genre_returns_404() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_session().await?;

    let response = server.get_authed("/movies/genres/Noir", &token).await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

// ============================================================================
// Director Tests (2 tests)
// ============================================================================

/// Test that a director lookup returns the biography and life dates.
#[tokio::test]
async fn test_get_director_by_name_returns_bio() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_session().await?;

    let response = server
        .get_authed("/movies/directors/Akira%20Kurosawa", &token)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["name"].as_str(), Some("Akira Kurosawa"));
    assert!(body["bio"].as_str().is_some_and(|b| !b.is_empty()));
    assert_eq!(body["birth"].as_str(), Some("1910-03-23"));
    assert_eq!(
        body["death"].as_str(),
        Some("1998-09-06"),
        "Life dates should round-trip"
    );

    Ok(())
}

/// Test that an unknown director returns 404.
#[tokio::test]
async fn test_get_unknown_director_returns_404() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_session().await?;

    let response = server
        .get_authed("/movies/directors/Nobody%20Atall", &token)
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
