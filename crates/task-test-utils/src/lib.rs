//! # Task Test Utilities
//!
//! Shared test utilities for the task service.
//!
//! This crate provides:
//! - Server test harness (`TestTaskServer` for E2E tests)
//! - Token builders that can forge any header/claims combination
//! - Fixed test fixtures (secrets, usernames, ids)
//! - Custom assertions (`TokenAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use task_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let server = TestTaskServer::spawn().await?;
//!     let token = server
//!         .register_and_login(TEST_USER_ALICE, TEST_PASSWORD, Some("user"))
//!         .await?;
//!
//!     token.assert_valid_jwt().assert_has_role("user");
//!
//!     let forged = TestTokenBuilder::new().for_user("alice").expired().sign(TEST_JWT_SECRET);
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod server_harness;
pub mod test_ids;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use server_harness::*;
pub use test_ids::*;
pub use token_builders::*;
