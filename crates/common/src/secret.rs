//! Secret types for protecting sensitive values from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate. Use these types for
//! every value that must never reach a log line: user passwords, the token
//! signing secret, and bearer tokens held outside of a request.
//!
//! `SecretBox<T>` and `SecretString` implement `Debug` with redaction, so a
//! struct that derives `Debug` while holding a secret stays safe to log.
//! Secrets are zeroized when dropped.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct LoginRequest {
//!     username: String,
//!     password: SecretString,
//! }
//!
//! let req = LoginRequest {
//!     username: "alice".to_string(),
//!     password: SecretString::from("hunter2"),
//! };
//!
//! assert!(!format!("{req:?}").contains("hunter2"));
//! let password: &str = req.password.expose_secret();
//! assert_eq!(password, "hunter2");
//! ```
//!
//! # Usage Guidelines
//!
//! Use `SecretString` for:
//! - User passwords arriving in registration and login requests
//! - Bearer tokens kept around by clients or test harnesses
//!
//! Use `SecretBox<Vec<u8>>` for:
//! - The HMAC signing secret loaded from `JWT_SECRET`
//!
//! # Serde Integration
//!
//! With the `serde` feature enabled, secrets can be deserialized from JSON
//! request bodies directly:
//!
//! ```rust
//! use serde::Deserialize;
//! use common::secret::SecretString;
//!
//! #[derive(Debug, Deserialize)]
//! struct Credentials {
//!     username: String,
//!     password: SecretString,
//! }
//!
//! let json = r#"{"username": "bob", "password": "pa55word"}"#;
//! let creds: Credentials = serde_json::from_str(json).unwrap();
//! assert!(!format!("{creds:?}").contains("pa55word"));
//! ```

pub use secrecy::{ExposeSecret, SecretBox, SecretString};
