//! E2E tests for the favorites endpoints.
//!
//! Favorites are owner-gated writes against the account record. Adding
//! requires the movie to exist in the catalog; both add and remove are
//! idempotent and return the updated record.
//!
//! ## Test Naming
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use flix_test_utils::{TestServer, TEST_MOVIE_ALIEN, TEST_MOVIE_INCEPTION};
use reqwest::StatusCode;
use uuid::Uuid;

/// Register an account and return (server, token).
async fn server_with_session() -> Result<(TestServer, String), anyhow::Error> {
    let server = TestServer::spawn().await?;
    server
        .register_user("aliceflix", "hunter2pass", "alice@example.com")
        .await?;
    let token = server.login_token("aliceflix", "hunter2pass").await?;
    Ok((server, token))
}

async fn add_favorite(
    server: &TestServer,
    token: &str,
    username: &str,
    movie_id: Uuid,
) -> Result<reqwest::Response, anyhow::Error> {
    let response = server
        .client()
        .post(format!(
            "{}/users/{username}/favorites/{movie_id}",
            server.url()
        ))
        .bearer_auth(token)
        .send()
        .await?;
    Ok(response)
}

async fn remove_favorite(
    server: &TestServer,
    token: &str,
    username: &str,
    movie_id: Uuid,
) -> Result<reqwest::Response, anyhow::Error> {
    let response = server
        .client()
        .delete(format!(
            "{}/users/{username}/favorites/{movie_id}",
            server.url()
        ))
        .bearer_auth(token)
        .send()
        .await?;
    Ok(response)
}

/// Test that adding a catalog movie returns the updated account record.
#[tokio::test]
async fn test_add_favorite_returns_updated_record() -> Result<(), anyhow::Error> {
    // Arrange
    let (server, token) = server_with_session().await?;

    // Act
    let response = add_favorite(&server, &token, "aliceflix", TEST_MOVIE_INCEPTION).await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    let favorites = body["favorites"]
        .as_array()
        .expect("Record should list favorites");
    assert_eq!(favorites.len(), 1);
    assert_eq!(
        favorites[0].as_str(),
        Some(TEST_MOVIE_INCEPTION.to_string().as_str())
    );

    Ok(())
}

/// Test that re-adding an already-listed movie is a no-op, not an error.
#[tokio::test]
async fn test_add_favorite_twice_is_idempotent() -> Result<(), anyhow::Error> {
    // Arrange
    let (server, token) = server_with_session().await?;
    add_favorite(&server, &token, "aliceflix", TEST_MOVIE_INCEPTION).await?;

    // Act
    let response = add_favorite(&server, &token, "aliceflix", TEST_MOVIE_INCEPTION).await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(
        body["favorites"].as_array().map(Vec::len),
        Some(1),
        "Duplicate adds must not grow the list"
    );

    Ok(())
}

/// Test that favoriting a movie absent from the catalog returns 404.
#[tokio::test]
async fn test_add_unknown_movie_returns_404() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_session().await?;

    let response = add_favorite(&server, &token, "aliceflix", Uuid::new_v4()).await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("NOT_FOUND"));

    Ok(())
}

/// Test that removing a favorite returns the record without it.
#[tokio::test]
async fn test_remove_favorite_returns_updated_record() -> Result<(), anyhow::Error> {
    // Arrange
    let (server, token) = server_with_session().await?;
    add_favorite(&server, &token, "aliceflix", TEST_MOVIE_INCEPTION).await?;
    add_favorite(&server, &token, "aliceflix", TEST_MOVIE_ALIEN).await?;

    // Act
    let response = remove_favorite(&server, &token, "aliceflix", TEST_MOVIE_INCEPTION).await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    let favorites = body["favorites"]
        .as_array()
        .expect("Record should list favorites");
    assert_eq!(favorites.len(), 1);
    assert_eq!(
        favorites[0].as_str(),
        Some(TEST_MOVIE_ALIEN.to_string().as_str()),
        "Only the removed id should disappear"
    );

    Ok(())
}

/// Test that removing an id that was never listed is a no-op.
#[tokio::test]
async fn test_remove_absent_favorite_is_noop() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_session().await?;

    let response = remove_favorite(&server, &token, "aliceflix", TEST_MOVIE_INCEPTION).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["favorites"].as_array().map(Vec::len), Some(0));

    Ok(())
}

/// Test that favorites on another user's account are forbidden.
#[tokio::test]
async fn test_favorites_on_other_account_return_403() -> Result<(), anyhow::Error> {
    // Arrange
    let (server, token) = server_with_session().await?;
    server
        .register_user("bobmovies", "bobsecret99", "bob@example.com")
        .await?;

    // Act
    let add = add_favorite(&server, &token, "bobmovies", TEST_MOVIE_INCEPTION).await?;
    let remove = remove_favorite(&server, &token, "bobmovies", TEST_MOVIE_INCEPTION).await?;

    // Assert
    assert_eq!(add.status(), StatusCode::FORBIDDEN);
    assert_eq!(remove.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Test that favorites require authentication at all.
#[tokio::test]
async fn test_favorites_without_token_return_401() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let response = server
        .client()
        .post(format!(
            "{}/users/aliceflix/favorites/{TEST_MOVIE_INCEPTION}",
            server.url()
        ))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
