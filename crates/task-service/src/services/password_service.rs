//! Password credential service.
//!
//! Hashes are self-describing bcrypt strings (`$2b$<cost>$<salt+hash>`), so
//! raising the configured cost only affects hashes created afterwards.

use crate::crypto;
use crate::errors::TaskError;
use crate::observability::metrics::record_password_hash;
use std::time::Instant;
use tracing::instrument;

/// One-way password hashing (enables mocking).
pub trait PasswordService: Send + Sync {
    /// Hash a plaintext password. The empty string is valid input.
    ///
    /// Fails only on internal errors, never because of the password's content.
    fn hash(&self, password: &str) -> Result<String, TaskError>;

    /// Check `password` against a stored hash.
    ///
    /// Returns `false` for a wrong password and for a hash this service
    /// cannot parse; the two cases are indistinguishable to the caller.
    fn verify(&self, password: &str, hash: &str) -> bool;

    /// A hash produced the same way as stored hashes, for verifying against
    /// when there is no stored hash. Costs the same bcrypt work as a real one.
    fn dummy_hash(&self) -> &str;
}

/// Input for the dummy hash. Verification results against it are discarded.
const DUMMY_PASSWORD: &str = "task-manager-dummy-password";

/// bcrypt-backed password service with a fixed cost.
#[derive(Debug, Clone)]
pub struct BcryptPasswordService {
    cost: u32,
    dummy_hash: String,
}

impl BcryptPasswordService {
    /// Create a service hashing at `cost`.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::HashingFailure` if `cost` is outside the supported
    /// range.
    pub fn new(cost: u32) -> Result<Self, TaskError> {
        let dummy_hash = crypto::hash_password(DUMMY_PASSWORD, cost)?;
        Ok(Self { cost, dummy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordService for BcryptPasswordService {
    #[instrument(skip_all, fields(cost = self.cost))]
    fn hash(&self, password: &str) -> Result<String, TaskError> {
        let start = Instant::now();
        let result = crypto::hash_password(password, self.cost);
        record_password_hash("hash", start.elapsed());

        if let Err(ref e) = result {
            tracing::error!(target: "task.services.password", error = %e, "Password hashing failed");
        }
        result
    }

    #[instrument(skip_all)]
    fn verify(&self, password: &str, hash: &str) -> bool {
        let start = Instant::now();
        let matches = crypto::verify_password(password, hash);
        record_password_hash("verify", start.elapsed());
        matches
    }

    fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }
}

pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock password service for unit testing.
    ///
    /// "Hashes" by prefixing, so tests stay fast and deterministic.
    pub struct MockPasswordService {
        hash_calls: AtomicUsize,
        verify_calls: AtomicUsize,
        return_error: bool,
    }

    impl MockPasswordService {
        /// Prefix applied by the mock hash.
        pub const PREFIX: &'static str = "mock-hash:";

        /// Create a mock that hashes successfully.
        pub fn working() -> Self {
            Self {
                hash_calls: AtomicUsize::new(0),
                verify_calls: AtomicUsize::new(0),
                return_error: false,
            }
        }

        /// Create a mock whose `hash` always fails.
        pub fn failing() -> Self {
            Self {
                return_error: true,
                ..Self::working()
            }
        }

        pub fn hash_calls(&self) -> usize {
            self.hash_calls.load(Ordering::SeqCst)
        }

        pub fn verify_calls(&self) -> usize {
            self.verify_calls.load(Ordering::SeqCst)
        }
    }

    impl PasswordService for MockPasswordService {
        fn hash(&self, password: &str) -> Result<String, TaskError> {
            self.hash_calls.fetch_add(1, Ordering::SeqCst);
            if self.return_error {
                return Err(TaskError::HashingFailure(
                    "Mock password service error".to_string(),
                ));
            }
            Ok(format!("{}{password}", Self::PREFIX))
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            self.verify_calls.fetch_add(1, Ordering::SeqCst);
            hash.strip_prefix(Self::PREFIX) == Some(password)
        }

        fn dummy_hash(&self) -> &str {
            "mock-dummy-hash"
        }
    }
}
