//! Middleware for the task service.
//!
//! Components:
//! - `auth` - bearer-token authentication and role-based authorization gates
//! - `http_metrics` - request metrics for every response

pub mod auth;
pub mod http_metrics;

pub use auth::{require_auth, require_role, AuthState, IdentityExt, RequiredRole, VerifiedIdentity};
pub use http_metrics::http_metrics_middleware;
