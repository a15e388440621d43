//! Deterministic cryptographic fixtures for testing
//!
//! Provides reproducible HMAC signing secrets and keyrings. All fixtures
//! are deterministic based on seed values.

use crate::test_ids::{TEST_KEY_ID_ACTIVE, TEST_KEY_ID_RETIRED};
use flix_service::crypto::{Keyring, SigningKey};

/// Generate a deterministic 32-byte HMAC secret for testing.
///
/// The same seed always produces the same secret, ensuring test
/// reproducibility.
///
/// # Example
/// ```rust,ignore
/// let secret = test_signing_secret(1);
/// // Same seed always produces same secret
/// assert_eq!(secret, test_signing_secret(1));
/// ```
pub fn test_signing_secret(seed: u8) -> Vec<u8> {
    let mut secret = vec![0u8; 32];
    secret[0] = seed;
    // Fill rest with deterministic pattern
    for (i, byte) in secret.iter_mut().enumerate().skip(1) {
        *byte = seed.wrapping_mul(i as u8).wrapping_add(i as u8);
    }
    secret
}

/// Keyring used by the test server: one active key plus one retired key.
///
/// Tokens signed with the retired key must keep validating, mirroring a
/// production rotation window.
pub fn test_keyring() -> Keyring {
    Keyring::new(
        SigningKey::new(TEST_KEY_ID_ACTIVE.to_string(), test_signing_secret(1)),
        vec![SigningKey::new(
            TEST_KEY_ID_RETIRED.to_string(),
            test_signing_secret(2),
        )],
    )
}

/// The retired key from [`test_keyring`], for minting rotation-era tokens.
pub fn retired_signing_key() -> SigningKey {
    SigningKey::new(TEST_KEY_ID_RETIRED.to_string(), test_signing_secret(2))
}

/// A key whose id matches the active key but whose secret differs.
///
/// Tokens signed with it resolve to a real key and then fail signature
/// verification, which is the forged-token case.
pub fn forged_signing_key() -> SigningKey {
    SigningKey::new(TEST_KEY_ID_ACTIVE.to_string(), test_signing_secret(99))
}

/// A key whose id is not in [`test_keyring`] at all, as after a key is
/// dropped from the rotation list.
pub fn dropped_signing_key() -> SigningKey {
    SigningKey::new("test-key-2019-01".to_string(), test_signing_secret(3))
}
