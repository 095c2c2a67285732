use common::secret::SecretBox;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default bcrypt cost factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Minimum accepted bcrypt cost (bcrypt's own lower bound).
pub const MIN_BCRYPT_COST: u32 = 4;

/// Maximum accepted bcrypt cost. Above this, a single login takes seconds.
pub const MAX_BCRYPT_COST: u32 = 14;

/// Default token validity window (24 hours).
pub const DEFAULT_JWT_TTL_SECONDS: i64 = 86_400;

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Service configuration, loaded once at startup.
///
/// Not `Clone`: the signing secret is moved into the token service and
/// nowhere else.
#[derive(Debug)]
pub struct Config {
    pub bind_address: String,
    pub jwt_secret: SecretBox<Vec<u8>>,
    pub bcrypt_cost: u32,
    pub jwt_ttl_seconds: i64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid JWT secret: {0}")]
    InvalidJwtSecret(String),

    #[error("Invalid bcrypt cost: {0}")]
    InvalidBcryptCost(String),

    #[error("Invalid token TTL: {0}")]
    InvalidTokenTtl(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let secret = vars
            .get("JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        if secret.is_empty() {
            return Err(ConfigError::InvalidJwtSecret(
                "JWT_SECRET must not be empty".to_string(),
            ));
        }

        let jwt_secret = SecretBox::new(Box::new(secret.as_bytes().to_vec()));

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let bcrypt_cost = match vars.get("BCRYPT_COST") {
            Some(raw) => {
                let cost: u32 = raw.parse().map_err(|e| {
                    ConfigError::InvalidBcryptCost(format!("'{raw}' is not a number: {e}"))
                })?;
                if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
                    return Err(ConfigError::InvalidBcryptCost(format!(
                        "Expected {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}, got {cost}"
                    )));
                }
                cost
            }
            None => DEFAULT_BCRYPT_COST,
        };

        let jwt_ttl_seconds = match vars.get("JWT_TTL_SECONDS") {
            Some(raw) => {
                let ttl: i64 = raw.parse().map_err(|e| {
                    ConfigError::InvalidTokenTtl(format!("'{raw}' is not a number: {e}"))
                })?;
                if ttl <= 0 {
                    return Err(ConfigError::InvalidTokenTtl(format!(
                        "Expected a positive number of seconds, got {ttl}"
                    )));
                }
                ttl
            }
            None => DEFAULT_JWT_TTL_SECONDS,
        };

        Ok(Config {
            bind_address,
            jwt_secret,
            bcrypt_cost,
            jwt_ttl_seconds,
        })
    }
}
