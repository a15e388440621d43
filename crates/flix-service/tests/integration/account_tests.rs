//! E2E tests for account management endpoints.
//!
//! Registration is public; reading, updating, and deleting an account are
//! authenticated and owner-gated. A valid session for one account must not
//! open another account's records.
//!
//! ## Test Categories
//!
//! - **Registration**: validation, duplicates, optional fields
//! - **Read**: own account, other accounts
//! - **Update**: partial updates, password changes, username conflicts
//! - **Delete**: own account, session invalidation
//!
//! ## Test Naming
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use flix_test_utils::TestServer;
use reqwest::StatusCode;
use serde_json::json;

/// Register two accounts and log the first one in.
async fn server_with_two_accounts() -> Result<(TestServer, String), anyhow::Error> {
    let server = TestServer::spawn().await?;
    server
        .register_user("aliceflix", "hunter2pass", "alice@example.com")
        .await?;
    server
        .register_user("bobmovies", "bobsecret99", "bob@example.com")
        .await?;
    let token = server.login_token("aliceflix", "hunter2pass").await?;
    Ok((server, token))
}

// ============================================================================
// Registration Tests (5 tests)
// ============================================================================

/// Test that valid registration returns 201 and the created record.
#[tokio::test]
async fn test_register_returns_201_with_record() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestServer::spawn().await?;

    // Act
    let response = server
        .register("aliceflix", "hunter2pass", "alice@example.com")
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["username"].as_str(), Some("aliceflix"));
    assert_eq!(body["email"].as_str(), Some("alice@example.com"));
    assert!(body["id"].as_str().is_some(), "Record should carry its id");
    assert_eq!(
        body["favorites"].as_array().map(Vec::len),
        Some(0),
        "New accounts start with no favorites"
    );

    Ok(())
}

/// Test that registration accepts an optional birthday.
#[tokio::test]
async fn test_register_with_birthday_round_trips() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/users", server.url()))
        .json(&json!({
            "username": "aliceflix",
            "password": "hunter2pass",
            "email": "alice@example.com",
            "birthday": "1988-04-12",
        }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["birthday"].as_str(), Some("1988-04-12"));

    Ok(())
}

/// Test that invalid fields are rejected with 422 and per-field details.
#[tokio::test]
async fn test_register_invalid_fields_return_422_with_details() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestServer::spawn().await?;

    // Act - short username, short password, bad email, all at once
    let response = server.register("ab", "short", "not-an-email").await?;

    // Assert
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("VALIDATION_FAILED"));

    let details = body["error"]["details"]
        .as_array()
        .expect("Validation failures should list every bad field");
    assert!(
        details.len() >= 3,
        "All three failures should be reported together, got {details:?}"
    );

    Ok(())
}

/// Test that a taken username is rejected with 409.
#[tokio::test]
async fn test_register_duplicate_username_returns_409() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestServer::spawn().await?;
    server
        .register_user("aliceflix", "hunter2pass", "alice@example.com")
        .await?;

    // Act
    let response = server
        .register("aliceflix", "differentpass", "other@example.com")
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("USERNAME_TAKEN"));

    Ok(())
}

/// Test that a rejected registration leaves no partial record behind.
#[tokio::test]
async fn test_failed_registration_stores_nothing() -> Result<(), anyhow::Error> {
    use flix_service::store::UserStore;

    let server = TestServer::spawn().await?;

    let response = server.register("ab", "short", "not-an-email").await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(
        server.store().find_by_username("ab").await?.is_none(),
        "Validation failures must not create accounts"
    );

    Ok(())
}

// ============================================================================
// Read Tests (2 tests)
// ============================================================================

/// Test that an authenticated user can read their own account.
#[tokio::test]
async fn test_get_own_account_returns_record() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_two_accounts().await?;

    let response = server.get_authed("/users/aliceflix", &token).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["username"].as_str(), Some("aliceflix"));
    assert!(body.get("password_hash").is_none());

    Ok(())
}

/// Test that reading another user's account is forbidden.
#[tokio::test]
async fn test_get_other_account_returns_403() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_two_accounts().await?;

    let response = server.get_authed("/users/bobmovies", &token).await?;

    assert_eq!(
        response.status(),
        StatusCode::FORBIDDEN,
        "A session must only open its own account"
    );

    Ok(())
}

// ============================================================================
// Update Tests (4 tests)
// ============================================================================

/// Test that a partial update changes only the provided fields.
#[tokio::test]
async fn test_update_email_keeps_other_fields() -> Result<(), anyhow::Error> {
    // Arrange
    let (server, token) = server_with_two_accounts().await?;

    // Act
    let response = server
        .client()
        .put(format!("{}/users/aliceflix", server.url()))
        .bearer_auth(&token)
        .json(&json!({"email": "alice.new@example.com"}))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["email"].as_str(), Some("alice.new@example.com"));
    assert_eq!(
        body["username"].as_str(),
        Some("aliceflix"),
        "Unmentioned fields keep their values"
    );

    // The old password still works
    let login = server.login("aliceflix", "hunter2pass").await?;
    assert_eq!(login.status(), StatusCode::OK);

    Ok(())
}

/// Test that a password change takes effect at the next login.
#[tokio::test]
async fn test_update_password_changes_login() -> Result<(), anyhow::Error> {
    // Arrange
    let (server, token) = server_with_two_accounts().await?;

    // Act
    let response = server
        .client()
        .put(format!("{}/users/aliceflix", server.url()))
        .bearer_auth(&token)
        .json(&json!({"password": "brandnewpass7"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Assert
    let old_password = server.login("aliceflix", "hunter2pass").await?;
    assert_eq!(
        old_password.status(),
        StatusCode::BAD_REQUEST,
        "The old password must stop working"
    );

    let new_password = server.login("aliceflix", "brandnewpass7").await?;
    assert_eq!(new_password.status(), StatusCode::OK);

    Ok(())
}

/// Test that renaming to a taken username is rejected with 409.
#[tokio::test]
async fn test_update_to_taken_username_returns_409() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_two_accounts().await?;

    let response = server
        .client()
        .put(format!("{}/users/aliceflix", server.url()))
        .bearer_auth(&token)
        .json(&json!({"username": "bobmovies"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    Ok(())
}

/// Test that updating another user's account is forbidden and changes
/// nothing.
#[tokio::test]
async fn test_update_other_account_returns_403() -> Result<(), anyhow::Error> {
    // Arrange
    let (server, token) = server_with_two_accounts().await?;

    // Act
    let response = server
        .client()
        .put(format!("{}/users/bobmovies", server.url()))
        .bearer_auth(&token)
        .json(&json!({"email": "hijacked@example.com"}))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Bob can still log in with his own credentials
    let login = server.login("bobmovies", "bobsecret99").await?;
    assert_eq!(login.status(), StatusCode::OK);

    Ok(())
}

// ============================================================================
// Delete Tests (3 tests)
// ============================================================================

/// Test that deleting your own account returns 204 and removes the record.
#[tokio::test]
async fn test_delete_own_account_returns_204() -> Result<(), anyhow::Error> {
    // Arrange
    let (server, token) = server_with_two_accounts().await?;

    // Act
    let response = server
        .client()
        .delete(format!("{}/users/aliceflix", server.url()))
        .bearer_auth(&token)
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let login = server.login("aliceflix", "hunter2pass").await?;
    assert_eq!(
        login.status(),
        StatusCode::BAD_REQUEST,
        "A deleted account must not authenticate"
    );

    Ok(())
}

/// Test that outstanding sessions stop working once the account is deleted.
#[tokio::test]
async fn test_delete_invalidates_outstanding_sessions() -> Result<(), anyhow::Error> {
    // Arrange
    let (server, token) = server_with_two_accounts().await?;

    let delete = server
        .client()
        .delete(format!("{}/users/aliceflix", server.url()))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);

    // Act - reuse the session that performed the deletion
    let response = server.get_authed("/movies", &token).await?;

    // Assert
    assert_eq!(
        response.status(),
        StatusCode::UNAUTHORIZED,
        "Sessions must not outlive their account"
    );

    Ok(())
}

/// Test that deleting another user's account is forbidden.
#[tokio::test]
async fn test_delete_other_account_returns_403() -> Result<(), anyhow::Error> {
    let (server, token) = server_with_two_accounts().await?;

    let response = server
        .client()
        .delete(format!("{}/users/bobmovies", server.url()))
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Bob is unharmed
    let login = server.login("bobmovies", "bobsecret99").await?;
    assert_eq!(login.status(), StatusCode::OK);

    Ok(())
}
