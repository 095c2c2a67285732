//! Task Manager Service Library
//!
//! An authenticated task-management HTTP API:
//!
//! - Account registration and login with bcrypt password storage
//! - Stateless HS256 session tokens carrying username, role and expiry
//! - An authentication gate on every `/api` route and a role gate on admin routes
//! - Task CRUD over in-memory storage
//!
//! # Architecture
//!
//! ```text
//! routes/mod.rs -> middleware/*.rs -> handlers/*.rs -> services/*.rs -> repositories/*.rs
//! ```
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `crypto` - Token signing/verification and password hashing primitives
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - Authentication, role and metrics middleware
//! - `models` - Data models
//! - `observability` - Metrics and log-safe field hashing
//! - `repositories` - Storage traits and in-memory implementations
//! - `routes` - Axum router setup
//! - `services` - Business logic layer

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
