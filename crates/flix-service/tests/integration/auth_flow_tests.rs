//! E2E tests for the credential and session token flow.
//!
//! Covers registration, login, and token-gated access as one story: an
//! account is created, exchanges its password for a session token, and
//! presents that token to reach protected resources.
//!
//! ## Test Categories
//!
//! - **Happy path**: register, login, protected access
//! - **Login rejection**: wrong password, unknown username, enumeration resistance
//! - **Response hygiene**: password hashes never serialized, token claims
//!
//! ## Test Naming
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use flix_service::config::DEFAULT_TOKEN_TTL_SECS;
use flix_test_utils::{TestServer, TokenAssertions, TEST_KEY_ID_ACTIVE};
use reqwest::StatusCode;

// ============================================================================
// Happy Path Tests (3 tests)
// ============================================================================

/// Test the full register, login, protected-access flow.
///
/// A new account registers, logs in with its password, and the returned
/// token opens a protected endpoint.
#[tokio::test]
async fn test_register_login_and_reach_protected_endpoint() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestServer::spawn().await?;
    let user = server
        .register_user("aliceflix", "hunter2pass", "alice@example.com")
        .await?;

    // Act
    let response = server.login("aliceflix", "hunter2pass").await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK, "Login should succeed");

    let body: serde_json::Value = response.json().await?;
    let token = body["token"]
        .as_str()
        .expect("Login response should include a token")
        .to_string();

    token
        .assert_valid_jwt()
        .assert_signed_by(TEST_KEY_ID_ACTIVE)
        .assert_for_subject(&user.id.to_string());

    let protected = server.get_authed("/movies", &token).await?;
    assert_eq!(
        protected.status(),
        StatusCode::OK,
        "Fresh token should open protected endpoints"
    );

    Ok(())
}

/// Test that the login response carries the account record and the token
/// lifetime matches the configured default (7 days).
#[tokio::test]
async fn test_login_returns_user_record_and_week_long_token() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestServer::spawn().await?;
    server
        .register_user("aliceflix", "hunter2pass", "alice@example.com")
        .await?;

    // Act
    let response = server.login("aliceflix", "hunter2pass").await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;

    assert_eq!(body["user"]["username"].as_str(), Some("aliceflix"));
    assert_eq!(body["user"]["email"].as_str(), Some("alice@example.com"));
    assert!(
        body["user"]["id"].as_str().is_some(),
        "Login response should expose the stable account id"
    );

    let token = body["token"]
        .as_str()
        .expect("Login response should include a token")
        .to_string();
    // Allow a minute of slack between issuance and this assertion
    token.assert_expires_within(DEFAULT_TOKEN_TTL_SECS + 60);

    Ok(())
}

/// Test that the token subject is the stable account id, not the username.
///
/// Renaming an account must not orphan its outstanding sessions.
#[tokio::test]
async fn test_login_token_survives_username_change() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestServer::spawn().await?;
    server
        .register_user("aliceflix", "hunter2pass", "alice@example.com")
        .await?;
    let token = server.login_token("aliceflix", "hunter2pass").await?;

    // Act - rename the account while the session is live
    let response = server
        .client()
        .put(format!("{}/users/aliceflix", server.url()))
        .bearer_auth(&token)
        .json(&serde_json::json!({"username": "alicerenamed"}))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Assert - the old token still resolves to the renamed account
    let account = server.get_authed("/users/alicerenamed", &token).await?;
    assert_eq!(
        account.status(),
        StatusCode::OK,
        "Sessions are keyed by id and must survive a rename"
    );

    Ok(())
}

// ============================================================================
// Login Rejection Tests (4 tests)
// ============================================================================

/// Test that a wrong password is rejected with 400 and no token.
#[tokio::test]
async fn test_login_wrong_password_returns_400() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestServer::spawn().await?;
    server
        .register_user("aliceflix", "hunter2pass", "alice@example.com")
        .await?;

    // Act
    let response = server.login("aliceflix", "wrong-password").await?;

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("INVALID_CREDENTIALS"));
    assert!(
        body.get("token").is_none(),
        "Failed login must not issue a token"
    );

    Ok(())
}

/// Test that an unknown username is rejected with 400.
#[tokio::test]
async fn test_login_unknown_username_returns_400() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let response = server.login("nobody", "hunter2pass").await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

/// Test that unknown-username and wrong-password rejections are
/// byte-identical, so login cannot be used to enumerate accounts.
#[tokio::test]
async fn test_login_failures_are_indistinguishable() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestServer::spawn().await?;
    server
        .register_user("aliceflix", "hunter2pass", "alice@example.com")
        .await?;

    // Act
    let unknown_user = server.login("nosuchaccount", "hunter2pass").await?;
    let wrong_password = server.login("aliceflix", "not-the-password").await?;

    // Assert
    assert_eq!(unknown_user.status(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);

    let unknown_body = unknown_user.bytes().await?;
    let wrong_body = wrong_password.bytes().await?;
    assert_eq!(
        unknown_body, wrong_body,
        "Rejection bodies must not reveal whether the username exists"
    );

    Ok(())
}

/// Test that username matching at login is exact and case-sensitive.
#[tokio::test]
async fn test_login_username_is_case_sensitive() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestServer::spawn().await?;
    server
        .register_user("AliceFlix", "hunter2pass", "alice@example.com")
        .await?;

    // Act
    let wrong_case = server.login("aliceflix", "hunter2pass").await?;
    let exact = server.login("AliceFlix", "hunter2pass").await?;

    // Assert
    assert_eq!(
        wrong_case.status(),
        StatusCode::BAD_REQUEST,
        "Case-folded usernames must not match"
    );
    assert_eq!(exact.status(), StatusCode::OK);

    Ok(())
}

// ============================================================================
// Response Hygiene Tests (2 tests)
// ============================================================================

/// Test that no response in the flow ever serializes the password hash.
#[tokio::test]
async fn test_password_hash_never_leaves_the_server() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestServer::spawn().await?;

    // Act
    let register_response = server
        .register("aliceflix", "hunter2pass", "alice@example.com")
        .await?;
    let register_body: serde_json::Value = register_response.json().await?;

    let login_response = server.login("aliceflix", "hunter2pass").await?;
    let login_body: serde_json::Value = login_response.json().await?;

    // Assert
    assert!(
        register_body.get("password_hash").is_none(),
        "Registration response must not carry the hash"
    );
    assert!(
        login_body["user"].get("password_hash").is_none(),
        "Login response must not carry the hash"
    );
    assert!(
        !register_body.to_string().contains("$2b$"),
        "No bcrypt material may appear in responses"
    );
    assert!(
        !login_body.to_string().contains("$2b$"),
        "No bcrypt material may appear in responses"
    );

    Ok(())
}

/// Test that the stored credential is a bcrypt hash, not the plaintext.
#[tokio::test]
async fn test_stored_password_is_bcrypt_hashed() -> Result<(), anyhow::Error> {
    use flix_service::store::UserStore;

    // Arrange
    let server = TestServer::spawn().await?;
    server
        .register_user("aliceflix", "hunter2pass", "alice@example.com")
        .await?;

    // Act
    let stored = server
        .store()
        .find_by_username("aliceflix")
        .await?
        .expect("Account should be in the store");

    // Assert
    assert_ne!(stored.password_hash, "hunter2pass");
    assert!(
        stored.password_hash.starts_with("$2"),
        "Stored credential should be a bcrypt hash, got {}",
        stored.password_hash
    );

    Ok(())
}
