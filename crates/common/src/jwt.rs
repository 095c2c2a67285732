//! JWT utilities shared across Task Manager components.
//!
//! This module provides the pieces of token handling that do not need the
//! signing secret:
//! - Size limit applied before any parsing
//! - The single accepted signing algorithm
//! - Algorithm extraction from the unverified JWT header
//! - Bearer header parsing
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing
//! - Only HS256 is accepted; every other `alg` value (including `none`) is refused
//! - Header inspection never implies trust; the signature must still be verified
//!
//! # Usage
//!
//! ```rust
//! use common::jwt::{extract_alg, EXPECTED_ALGORITHM};
//!
//! // {"alg":"HS256","typ":"JWT"} . {} . sig
//! let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.e30.c2ln";
//! assert_eq!(extract_alg(token).as_deref(), Ok(EXPECTED_ALGORITHM));
//! ```

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed JWT size in bytes (8KB).
///
/// A normal task manager token is well under 300 bytes. Anything above this
/// limit is rejected before base64 decoding or HMAC computation.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// The only signing algorithm the service issues or accepts.
pub const EXPECTED_ALGORITHM: &str = "HS256";

/// Prefix of the `Authorization` header value carrying a token.
///
/// Matching is case-sensitive and requires the single trailing space.
pub const BEARER_PREFIX: &str = "Bearer ";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while inspecting a JWT header.
///
/// Display text is deliberately identical for every variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtHeaderError {
    /// Token size exceeds [`MAX_JWT_SIZE_BYTES`].
    #[error("The access token is invalid or expired")]
    TokenTooLarge,

    /// Token is not three dot-separated segments, or the header is not base64url JSON.
    #[error("The access token is invalid or expired")]
    MalformedToken,

    /// Header has no `alg` field, or `alg` is not a string.
    #[error("The access token is invalid or expired")]
    MissingAlg,
}

// =============================================================================
// Functions
// =============================================================================

/// Extract the `alg` value from a JWT header without verifying the signature.
///
/// The caller compares the result to [`EXPECTED_ALGORITHM`] so that tokens
/// signed with another algorithm can be reported distinctly from garbage.
///
/// # Errors
///
/// - `TokenTooLarge` - Token exceeds the size limit
/// - `MalformedToken` - Wrong segment count, bad base64, or invalid JSON
/// - `MissingAlg` - Header lacks a string `alg` field
pub fn extract_alg(token: &str) -> Result<String, JwtHeaderError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtHeaderError::TokenTooLarge);
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        tracing::debug!(
            target: "common.jwt",
            parts = parts.len(),
            "Token rejected: invalid JWT format"
        );
        return Err(JwtHeaderError::MalformedToken);
    }

    let header_part = parts.first().ok_or(JwtHeaderError::MalformedToken)?;
    let header_bytes = URL_SAFE_NO_PAD.decode(header_part).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to decode JWT header base64");
        JwtHeaderError::MalformedToken
    })?;

    let header: serde_json::Value = serde_json::from_slice(&header_bytes).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to parse JWT header JSON");
        JwtHeaderError::MalformedToken
    })?;

    header
        .get("alg")
        .and_then(|v| v.as_str())
        .map(ToString::to_string)
        .ok_or(JwtHeaderError::MissingAlg)
}

/// Extract the token from an `Authorization` header value.
///
/// Returns `None` unless the value starts with exactly `"Bearer "`.
/// The remainder is returned as-is, so an empty token yields `Some("")`.
#[must_use]
pub fn extract_bearer(header_value: &str) -> Option<&str> {
    header_value.strip_prefix(BEARER_PREFIX)
}
