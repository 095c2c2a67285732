//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for session tokens. Claims are read
//! without signature verification.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// Session claims structure
#[derive(Debug, Deserialize)]
struct SessionClaims {
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: i64,
}

fn decode_part<T: for<'de> Deserialize<'de>>(token: &str, index: usize, what: &str) -> T {
    let part = token
        .split('.')
        .nth(index)
        .unwrap_or_else(|| panic!("JWT has no {what} part"));
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .unwrap_or_else(|e| panic!("Failed to base64 decode JWT {what}: {e}"));
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("Failed to parse JWT {what}: {e}"))
}

/// Custom assertions for session tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_for_user("alice")
///     .assert_has_role("admin")
///     .assert_expires_in(86_400);
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a three-part HS256 JWT with readable claims
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token is for the specified username
    fn assert_for_user(&self, username: &str) -> &Self;

    /// Assert that the token carries the specified role
    fn assert_has_role(&self, role: &str) -> &Self;

    /// Assert that the token expires within the specified seconds (5s tolerance)
    fn assert_expires_in(&self, seconds: i64) -> &Self;
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        let header: JwtHeader = decode_part(self, 0, "header");
        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        let _: SessionClaims = decode_part(self, 1, "payload");
        self
    }

    fn assert_for_user(&self, username: &str) -> &Self {
        let claims: SessionClaims = decode_part(self, 1, "payload");
        assert_eq!(claims.username, username, "Token is for a different user");
        self
    }

    fn assert_has_role(&self, role: &str) -> &Self {
        let claims: SessionClaims = decode_part(self, 1, "payload");
        assert_eq!(claims.role.as_deref(), Some(role), "Token carries a different role");
        self
    }

    fn assert_expires_in(&self, seconds: i64) -> &Self {
        let claims: SessionClaims = decode_part(self, 1, "payload");
        let expires_in = claims.exp - chrono::Utc::now().timestamp();

        assert!(
            (expires_in - seconds).abs() <= 5,
            "Expected token to expire in ~{seconds}s, expires in {expires_in}s"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_builders::TestTokenBuilder;

    #[test]
    fn test_assertions_chain() {
        let token = TestTokenBuilder::new()
            .for_user("alice")
            .with_role("admin")
            .expires_in(600)
            .sign("secret");

        token
            .assert_valid_jwt()
            .assert_for_user("alice")
            .assert_has_role("admin")
            .assert_expires_in(600);
    }

    #[test]
    #[should_panic(expected = "different role")]
    fn test_role_mismatch_panics() {
        TestTokenBuilder::new()
            .with_role("user")
            .sign("secret")
            .assert_has_role("admin");
    }

    #[test]
    #[should_panic(expected = "Expected HS256")]
    fn test_other_algorithm_is_not_valid() {
        TestTokenBuilder::new()
            .with_alg("HS512")
            .sign("secret")
            .assert_valid_jwt();
    }
}
