//! Task CRUD handlers.
//!
//! All routes here sit behind the authentication gate. Any authenticated
//! identity may read and write every task.

use crate::errors::TaskError;
use crate::models::{Task, TaskInput};
use crate::routes::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::observe_error;

/// GET /api/tasks
#[instrument(skip_all, name = "task.handler.list")]
pub async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, TaskError> {
    let tasks = state
        .tasks
        .list()
        .await
        .map_err(observe_error("list_tasks"))?;
    Ok(Json(tasks))
}

/// GET /api/tasks/:id
#[instrument(skip_all, name = "task.handler.get")]
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, TaskError> {
    let task = state
        .tasks
        .get(&id)
        .await
        .map_err(observe_error("get_task"))?;
    Ok(Json(task))
}

/// POST /api/tasks
///
/// Returns 201 with the stored task, including its generated id.
#[instrument(skip_all, name = "task.handler.create")]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TaskInput>,
) -> Result<(StatusCode, Json<Task>), TaskError> {
    let task = state
        .tasks
        .create(input)
        .await
        .map_err(observe_error("create_task"))?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/:id
///
/// Full replacement: every field of the input is written.
#[instrument(skip_all, name = "task.handler.update")]
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<TaskInput>,
) -> Result<Json<Task>, TaskError> {
    let task = state
        .tasks
        .update(&id, input)
        .await
        .map_err(observe_error("update_task"))?;
    Ok(Json(task))
}

/// DELETE /api/tasks/:id
#[instrument(skip_all, name = "task.handler.delete")]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, TaskError> {
    state
        .tasks
        .delete(&id)
        .await
        .map_err(observe_error("delete_task"))?;
    Ok(StatusCode::NO_CONTENT)
}
