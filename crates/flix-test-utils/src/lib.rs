//! # myFlix Test Utilities
//!
//! Shared test utilities for the myFlix API.
//!
//! This crate provides:
//! - Server test harness (TestServer for E2E tests, no database required)
//! - Deterministic crypto fixtures (fixed HMAC keys for reproducible tests)
//! - Seed movie catalog (three movies with known titles and directors)
//! - Test data builders (TestTokenBuilder)
//! - Fixed test IDs (UUIDs, constants)
//! - Custom assertions (TokenAssertions trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use flix_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestServer::spawn().await?;
//!
//!     server.register_user("aliceflix", "hunter2pass", "alice@example.com").await?;
//!     let token = server.login_token("aliceflix", "hunter2pass").await?;
//!
//!     // Use custom assertions
//!     token.assert_valid_jwt()
//!          .assert_signed_by(TEST_KEY_ID_ACTIVE);
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod catalog_fixtures;
pub mod crypto_fixtures;
pub mod server_harness;
pub mod test_ids;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use catalog_fixtures::*;
pub use crypto_fixtures::*;
pub use server_harness::*;
pub use test_ids::*;
pub use token_builders::*;
