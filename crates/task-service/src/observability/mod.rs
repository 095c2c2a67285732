//! Observability for the task service.
//!
//! # Privacy by Default
//!
//! Instrumented functions use `#[instrument(skip_all)]` and record fields
//! explicitly. Fields fall into three groups:
//! - **SAFE**: logged in plaintext (roles, outcome labels, task ids)
//! - **HASHED**: SHA-256 prefix only, for correlation (usernames)
//! - **NEVER**: must never appear in logs (passwords, password hashes, tokens, the signing secret)

pub mod metrics;

use crate::errors::TaskError;
use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars).
///
/// One-way and truncated: enough to follow one user through the logs, not
/// enough to recover the username.
pub fn hash_for_correlation(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    hex::encode(digest.get(..4).unwrap_or_default())
}

/// Error categories for metrics labels (bounded cardinality).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing/invalid token, bad credentials
    Authentication,
    /// Role mismatch
    Authorization,
    /// Bad input: validation failures, malformed ids, missing resources, conflicts
    Client,
    /// Hashing, storage, anything else
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::Authorization => "authorization",
            ErrorCategory::Client => "client",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl From<&TaskError> for ErrorCategory {
    fn from(err: &TaskError) -> Self {
        match err {
            TaskError::MissingToken | TaskError::InvalidToken | TaskError::InvalidCredentials => {
                ErrorCategory::Authentication
            }
            TaskError::RoleMismatch { .. } => ErrorCategory::Authorization,
            TaskError::UserAlreadyExists
            | TaskError::NotFound
            | TaskError::InvalidId(_)
            | TaskError::Validation(_) => ErrorCategory::Client,
            TaskError::HashingFailure(_) | TaskError::Repository(_) | TaskError::Internal => {
                ErrorCategory::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_for_correlation_consistency() {
        assert_eq!(hash_for_correlation("alice"), hash_for_correlation("alice"));
    }

    #[test]
    fn test_hash_for_correlation_uniqueness() {
        assert_ne!(hash_for_correlation("alice"), hash_for_correlation("bob"));
    }

    #[test]
    fn test_hash_for_correlation_length() {
        let hash = hash_for_correlation("any-value");
        assert_eq!(hash.len(), 8, "Hash should be 8 hex characters");
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash, "any-value");
    }

    #[test]
    fn test_error_category_mapping() {
        assert_eq!(
            ErrorCategory::from(&TaskError::InvalidToken),
            ErrorCategory::Authentication
        );
        assert_eq!(
            ErrorCategory::from(&TaskError::MissingToken),
            ErrorCategory::Authentication
        );
        assert_eq!(
            ErrorCategory::from(&TaskError::InvalidCredentials),
            ErrorCategory::Authentication
        );
        assert_eq!(
            ErrorCategory::from(&TaskError::RoleMismatch {
                required: "admin".into()
            }),
            ErrorCategory::Authorization
        );
        assert_eq!(
            ErrorCategory::from(&TaskError::Validation("x".into())),
            ErrorCategory::Client
        );
        assert_eq!(
            ErrorCategory::from(&TaskError::HashingFailure("x".into())),
            ErrorCategory::Internal
        );
        assert_eq!(
            ErrorCategory::from(&TaskError::Repository("x".into())),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn test_error_category_as_str() {
        assert_eq!(ErrorCategory::Authentication.as_str(), "authentication");
        assert_eq!(ErrorCategory::Authorization.as_str(), "authorization");
        assert_eq!(ErrorCategory::Client.as_str(), "client");
        assert_eq!(ErrorCategory::Internal.as_str(), "internal");
    }
}
