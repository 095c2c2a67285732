use crate::config::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::errors::{TaskError, TokenError};
use common::jwt::{extract_alg, JwtHeaderError, EXPECTED_ALGORITHM, MAX_JWT_SIZE_BYTES};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::instrument;

/// Session token claims.
///
/// `username` identifies the account and is redacted in Debug output.
/// `role` is lenient on the way in: a token whose `role` is absent or not a
/// string still verifies, but carries no role and therefore passes no role gate.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(
        default,
        deserialize_with = "deserialize_role",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("username", &"[REDACTED]")
            .field("role", &self.role)
            .field("exp", &self.exp)
            .field("iat", &self.iat)
            .finish()
    }
}

fn deserialize_role<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(ToString::to_string))
}

/// Sign claims as an HS256 JWT.
#[instrument(skip_all)]
pub fn sign_jwt(claims: &Claims, secret: &[u8]) -> Result<String, TokenError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());

    encode(&header, claims, &EncodingKey::from_secret(secret))
        .map_err(|e| TokenError::Signing(format!("JWT signing operation failed: {e}")))
}

/// Verify an HS256 JWT and return its claims.
///
/// Checks, in order:
/// - Size (must be <= `MAX_JWT_SIZE_BYTES`), before any decoding
/// - Header `alg` must be exactly HS256; the header never selects the key or method
/// - HMAC signature against `secret`
/// - `exp` present and strictly in the future (zero leeway)
#[instrument(skip_all)]
pub fn verify_jwt(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "task.crypto",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(TokenError::Malformed);
    }

    let alg = extract_alg(token).map_err(|e| {
        tracing::debug!(target: "task.crypto", error = ?e, "Token rejected: unreadable header");
        match e {
            JwtHeaderError::TokenTooLarge
            | JwtHeaderError::MalformedToken
            | JwtHeaderError::MissingAlg => TokenError::Malformed,
        }
    })?;

    if alg != EXPECTED_ALGORITHM {
        tracing::debug!(
            target: "task.crypto",
            alg = %alg,
            "Token rejected: unexpected algorithm"
        );
        return Err(TokenError::UnexpectedAlgorithm);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp"]);

    let token_data =
        decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation).map_err(|e| {
            let mapped = match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm,
                _ => TokenError::Malformed,
            };
            tracing::debug!(
                target: "task.crypto",
                error = %e,
                outcome = mapped.as_label(),
                "Token verification failed"
            );
            mapped
        })?;

    // jsonwebtoken accepts exp == now; a token is already expired at its expiry instant
    let now = chrono::Utc::now().timestamp();
    if token_data.claims.exp <= now {
        tracing::debug!(
            target: "task.crypto",
            exp = token_data.claims.exp,
            now = now,
            "Token rejected: expired"
        );
        return Err(TokenError::Expired);
    }

    Ok(token_data.claims)
}

/// Hash a password with bcrypt at the given cost.
///
/// The empty string is a valid password.
///
/// # Errors
///
/// Returns `TaskError::HashingFailure` if the cost is outside
/// `MIN_BCRYPT_COST..=MAX_BCRYPT_COST` or bcrypt itself fails.
#[instrument(skip_all)]
pub fn hash_password(password: &str, cost: u32) -> Result<String, TaskError> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(TaskError::HashingFailure(format!(
            "Invalid bcrypt cost: {cost} (must be {MIN_BCRYPT_COST}-{MAX_BCRYPT_COST})"
        )));
    }

    bcrypt::hash(password, cost)
        .map_err(|e| TaskError::HashingFailure(format!("Password hashing failed: {e}")))
}

/// Verify a password against a bcrypt hash.
///
/// A malformed or foreign-format hash yields `false`, indistinguishable from
/// a wrong password.
#[instrument(skip_all)]
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::debug!(target: "task.crypto", error = %e, "Password hash could not be parsed");
            false
        }
    }
}
