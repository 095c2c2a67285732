//! Integration tests for the task service
//!
//! This is the top-level integration test harness that Cargo discovers.
//! Test modules are organized in the integration/ subdirectory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

#[path = "integration/health_tests.rs"]
mod health_tests;

#[path = "integration/auth_flow_tests.rs"]
mod auth_flow_tests;

#[path = "integration/token_rejection_tests.rs"]
mod token_rejection_tests;

#[path = "integration/admin_tests.rs"]
mod admin_tests;

#[path = "integration/task_tests.rs"]
mod task_tests;
