//! Access control middleware.
//!
//! Two gates, composed per route group:
//! - `require_auth` - verifies the bearer token and inserts a `VerifiedIdentity`
//!   into request extensions
//! - `require_role` - admits only requests whose identity carries the route's
//!   required role; must be layered inside `require_auth`
//!
//! Both gates are terminal on rejection: the downstream handler never runs.

use crate::errors::TaskError;
use crate::observability::hash_for_correlation;
use crate::observability::metrics::record_authorization_decision;
use crate::services::TokenService;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::IntoResponse,
};
use common::jwt::extract_bearer;
use std::fmt;
use std::sync::Arc;
use tracing::instrument;

/// State for the authentication gate.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenService>,
}

/// Identity established by `require_auth` for the lifetime of one request.
///
/// `role` is `None` when the token carried no usable role claim.
#[derive(Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub username: String,
    pub role: Option<String>,
}

impl fmt::Debug for VerifiedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifiedIdentity")
            .field("username", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// Role a route group requires, used as `require_role` state.
#[derive(Debug, Clone, Copy)]
pub struct RequiredRole(pub &'static str);

/// Extract the bearer token from the Authorization header.
fn extract_bearer_token(req: &Request) -> Result<&str, TaskError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!(target: "task.middleware.auth", "Missing Authorization header");
            TaskError::MissingToken
        })?;

    extract_bearer(auth_header).ok_or_else(|| {
        tracing::debug!(target: "task.middleware.auth", "Invalid Authorization header format");
        TaskError::MissingToken
    })
}

/// Authentication gate.
///
/// # Response
///
/// - 401 `MISSING_TOKEN` if the header is absent or not `Bearer <token>`
/// - 401 `INVALID_TOKEN` for every verification failure
/// - Otherwise continues with `VerifiedIdentity` in extensions
#[instrument(skip_all, name = "task.middleware.auth")]
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, TaskError> {
    let token = extract_bearer_token(&req)?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!(
            target: "task.middleware.auth",
            outcome = e.as_label(),
            "Token rejected"
        );
        TaskError::InvalidToken
    })?;

    tracing::debug!(
        target: "task.middleware.auth",
        user = %hash_for_correlation(&claims.username),
        "Request authenticated"
    );

    req.extensions_mut().insert(VerifiedIdentity {
        username: claims.username,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Authorization gate.
///
/// # Response
///
/// - 403 `ROLE_MISMATCH` if no identity is present or its role differs
/// - Otherwise continues unchanged
#[instrument(skip_all, name = "task.middleware.role")]
pub async fn require_role(
    State(required): State<RequiredRole>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, TaskError> {
    let role = req
        .extensions()
        .get::<VerifiedIdentity>()
        .and_then(|identity| identity.role.as_deref());

    if role != Some(required.0) {
        tracing::debug!(
            target: "task.middleware.role",
            required_role = required.0,
            has_role = role.is_some(),
            "Role check failed"
        );
        record_authorization_decision(required.0, "denied");
        return Err(TaskError::RoleMismatch {
            required: required.0.to_string(),
        });
    }

    record_authorization_decision(required.0, "allowed");
    Ok(next.run(req).await)
}

/// Extension trait for reading the verified identity from a request.
pub trait IdentityExt {
    /// Returns `None` if `require_auth` did not run for this request.
    fn identity(&self) -> Option<&VerifiedIdentity>;
}

impl<B> IdentityExt for axum::extract::Request<B> {
    fn identity(&self) -> Option<&VerifiedIdentity> {
        self.extensions().get::<VerifiedIdentity>()
    }
}
