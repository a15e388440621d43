//! Fixed test IDs for deterministic tests
//!
//! All test IDs are deterministic to ensure reproducible test results.
//! Using fixed UUIDs prevents flaky tests caused by random data.

use uuid::Uuid;

// Movie IDs (1-99)
pub const TEST_MOVIE_INCEPTION: Uuid = Uuid::from_u128(1);
pub const TEST_MOVIE_ALIEN: Uuid = Uuid::from_u128(2);
pub const TEST_MOVIE_SEVEN_SAMURAI: Uuid = Uuid::from_u128(3);

// User IDs (100-199), for records inserted directly into the store
pub const TEST_USER_ALICE: Uuid = Uuid::from_u128(100);
pub const TEST_USER_BOB: Uuid = Uuid::from_u128(101);

// Signing key IDs (strings)
pub const TEST_KEY_ID_ACTIVE: &str = "test-key-2025-02";
pub const TEST_KEY_ID_RETIRED: &str = "test-key-2024-11";

// Test credentials (for registration and login)
pub const TEST_USERNAME: &str = "aliceflix";
pub const TEST_PASSWORD: &str = "hunter2pass";
pub const TEST_EMAIL: &str = "alice@example.com";
