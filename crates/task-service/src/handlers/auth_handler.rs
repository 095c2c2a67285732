use crate::errors::TaskError;
use crate::models::{LoginRequest, LoginResponse, MessageResponse, RegistrationRequest};
use crate::routes::AppState;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::instrument;

use super::observe_error;

/// Handle account registration
///
/// POST /register
///
/// Returns 201 with a confirmation message; the stored user is not echoed.
#[instrument(skip_all, name = "task.handler.register")]
pub async fn handle_register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), TaskError> {
    state
        .users
        .register(payload)
        .await
        .map_err(observe_error("register"))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("user registered successfully")),
    ))
}

/// Handle login
///
/// POST /login
///
/// Returns `{"token": "..."}` on success, 401 `INVALID_CREDENTIALS` otherwise.
#[instrument(skip_all, name = "task.handler.login")]
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, TaskError> {
    let response = state
        .users
        .login(payload)
        .await
        .map_err(observe_error("login"))?;

    Ok(Json(response))
}
