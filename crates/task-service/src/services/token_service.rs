//! Session token service.
//!
//! Tokens are HS256 JWTs carrying `username`, `role`, `exp` and `iat`. The
//! signing secret is injected at construction and never leaves this type.

use crate::crypto::{self, Claims};
use crate::errors::TokenError;
use crate::observability::metrics::{record_token_issuance, record_token_validation};
use common::secret::{ExposeSecret, SecretBox};
use tracing::instrument;

/// Issue and verify session tokens (enables mocking).
pub trait TokenService: Send + Sync {
    /// Issue a token for `username` with `role`, valid for the configured window.
    fn issue(&self, username: &str, role: &str) -> Result<String, TokenError>;

    /// Verify a token and return its claims.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

pub struct JwtTokenService {
    secret: SecretBox<Vec<u8>>,
    ttl_seconds: i64,
}

impl JwtTokenService {
    pub fn new(secret: SecretBox<Vec<u8>>, ttl_seconds: i64) -> Self {
        Self {
            secret,
            ttl_seconds,
        }
    }
}

impl TokenService for JwtTokenService {
    #[instrument(skip_all)]
    fn issue(&self, username: &str, role: &str) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            username: username.to_string(),
            role: Some(role.to_string()),
            exp: now + self.ttl_seconds,
            iat: now,
        };

        match crypto::sign_jwt(&claims, self.secret.expose_secret()) {
            Ok(token) => {
                record_token_issuance("success");
                Ok(token)
            }
            Err(e) => {
                tracing::error!(target: "task.services.token", error = %e, "Token signing failed");
                record_token_issuance("error");
                Err(e)
            }
        }
    }

    #[instrument(skip_all)]
    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        match crypto::verify_jwt(token, self.secret.expose_secret()) {
            Ok(claims) => {
                record_token_validation("success", None);
                Ok(claims)
            }
            Err(e) => {
                tracing::debug!(
                    target: "task.services.token",
                    outcome = e.as_label(),
                    "Token verification rejected"
                );
                record_token_validation("error", Some(e.as_label()));
                Err(e)
            }
        }
    }
}

pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock token service for unit testing.
    pub struct MockTokenService {
        claims: Option<Claims>,
        error: Option<TokenError>,
        issue_calls: AtomicUsize,
        verify_calls: AtomicUsize,
    }

    impl MockTokenService {
        /// Create a mock whose `verify` always returns these claims.
        pub fn accepting(username: &str, role: Option<&str>) -> Self {
            Self {
                claims: Some(Claims {
                    username: username.to_string(),
                    role: role.map(ToString::to_string),
                    exp: chrono::Utc::now().timestamp() + 3600,
                    iat: chrono::Utc::now().timestamp(),
                }),
                error: None,
                issue_calls: AtomicUsize::new(0),
                verify_calls: AtomicUsize::new(0),
            }
        }

        /// Create a mock whose `verify` and `issue` always fail with `error`.
        pub fn rejecting(error: TokenError) -> Self {
            Self {
                claims: None,
                error: Some(error),
                issue_calls: AtomicUsize::new(0),
                verify_calls: AtomicUsize::new(0),
            }
        }

        pub fn issue_calls(&self) -> usize {
            self.issue_calls.load(Ordering::SeqCst)
        }

        pub fn verify_calls(&self) -> usize {
            self.verify_calls.load(Ordering::SeqCst)
        }
    }

    impl TokenService for MockTokenService {
        fn issue(&self, username: &str, role: &str) -> Result<String, TokenError> {
            self.issue_calls.fetch_add(1, Ordering::SeqCst);
            match &self.error {
                Some(e) => Err(e.clone()),
                None => Ok(format!("mock-token.{username}.{role}")),
            }
        }

        fn verify(&self, _token: &str) -> Result<Claims, TokenError> {
            self.verify_calls.fetch_add(1, Ordering::SeqCst);
            match (&self.claims, &self.error) {
                (Some(claims), _) => Ok(claims.clone()),
                (None, Some(e)) => Err(e.clone()),
                (None, None) => Err(TokenError::Malformed),
            }
        }
    }
}
