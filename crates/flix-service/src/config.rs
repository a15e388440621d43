use crate::crypto::{Keyring, SigningKey};
use base64::{engine::general_purpose, Engine as _};
use common::jwt::MAX_CLOCK_SKEW;
use std::collections::{HashMap, HashSet};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default session token lifetime: 7 days.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 604_800;

/// Default clock skew tolerance for iat validation (5 minutes).
pub const DEFAULT_JWT_CLOCK_SKEW_SECONDS: u64 = 300;

/// Minimum acceptable bcrypt cost factor (OWASP 2024 guidance).
pub const MIN_BCRYPT_COST: u32 = 10;

/// Maximum acceptable bcrypt cost factor (login latency bound).
pub const MAX_BCRYPT_COST: u32 = 14;

/// Default bcrypt cost factor.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Minimum HMAC signing key length in bytes (matches the HS256 digest size).
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Signing keys in precedence order. The first key signs new tokens;
    /// the rest still verify tokens issued before a rotation.
    pub keyring: Keyring,
    pub token_ttl_secs: i64,
    pub jwt_clock_skew: Duration,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid signing key configuration: {0}")]
    InvalidSigningKeys(String),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?
            .clone();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let keys_value = vars
            .get("FLIX_TOKEN_KEYS")
            .ok_or_else(|| ConfigError::MissingEnvVar("FLIX_TOKEN_KEYS".to_string()))?;

        let keyring = parse_keyring(keys_value)?;

        let token_ttl_secs = match vars.get("FLIX_TOKEN_TTL_SECS") {
            Some(raw) => {
                let ttl: i64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    var: "FLIX_TOKEN_TTL_SECS".to_string(),
                    reason: format!("not an integer: {raw}"),
                })?;
                if ttl <= 0 {
                    return Err(ConfigError::InvalidValue {
                        var: "FLIX_TOKEN_TTL_SECS".to_string(),
                        reason: format!("must be positive, got {ttl}"),
                    });
                }
                ttl
            }
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let skew_secs = match vars.get("FLIX_CLOCK_SKEW_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    var: "FLIX_CLOCK_SKEW_SECS".to_string(),
                    reason: format!("not a non-negative integer: {raw}"),
                })?;
                if secs > MAX_CLOCK_SKEW.as_secs() {
                    return Err(ConfigError::InvalidValue {
                        var: "FLIX_CLOCK_SKEW_SECS".to_string(),
                        reason: format!(
                            "must be at most {} seconds, got {secs}",
                            MAX_CLOCK_SKEW.as_secs()
                        ),
                    });
                }
                secs
            }
            None => DEFAULT_JWT_CLOCK_SKEW_SECONDS,
        };

        let bcrypt_cost = match vars.get("FLIX_BCRYPT_COST") {
            Some(raw) => {
                let cost: u32 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    var: "FLIX_BCRYPT_COST".to_string(),
                    reason: format!("not an integer: {raw}"),
                })?;
                if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
                    return Err(ConfigError::InvalidValue {
                        var: "FLIX_BCRYPT_COST".to_string(),
                        reason: format!("must be {MIN_BCRYPT_COST}-{MAX_BCRYPT_COST}, got {cost}"),
                    });
                }
                cost
            }
            None => DEFAULT_BCRYPT_COST,
        };

        Ok(Config {
            database_url,
            bind_address,
            keyring,
            token_ttl_secs,
            jwt_clock_skew: Duration::from_secs(skew_secs),
            bcrypt_cost,
        })
    }
}

/// Parse `FLIX_TOKEN_KEYS` into a keyring.
///
/// Format: comma-separated `kid:base64secret` entries. The first entry is the
/// active signing key, the rest are retired keys kept for verification only.
/// Rotation is a config change: prepend the new key, keep the old one in the
/// list until its tokens age out, then drop it.
fn parse_keyring(raw: &str) -> Result<Keyring, ConfigError> {
    let mut keys = Vec::new();
    let mut seen = HashSet::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let (kid, secret_base64) = entry.split_once(':').ok_or_else(|| {
            ConfigError::InvalidSigningKeys(format!("entry is not in kid:base64 form: {entry}"))
        })?;

        let kid = kid.trim();
        if kid.is_empty() {
            return Err(ConfigError::InvalidSigningKeys(
                "key id must not be empty".to_string(),
            ));
        }
        if !seen.insert(kid.to_string()) {
            return Err(ConfigError::InvalidSigningKeys(format!(
                "duplicate key id: {kid}"
            )));
        }

        let secret = general_purpose::STANDARD
            .decode(secret_base64.trim())
            .map_err(ConfigError::Base64Error)?;

        if secret.len() < MIN_SIGNING_KEY_BYTES {
            return Err(ConfigError::InvalidSigningKeys(format!(
                "key {kid} is {} bytes, expected at least {MIN_SIGNING_KEY_BYTES}",
                secret.len()
            )));
        }

        keys.push(SigningKey::new(kid.to_string(), secret));
    }

    let mut keys = keys.into_iter();
    let active = keys.next().ok_or_else(|| {
        ConfigError::InvalidSigningKeys(
            "FLIX_TOKEN_KEYS must contain at least one key".to_string(),
        )
    })?;

    Ok(Keyring::new(active, keys.collect()))
}
