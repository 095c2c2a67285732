//! Task CRUD with field validation.

use crate::errors::TaskError;
use crate::models::{Task, TaskInput};
use crate::repositories::TaskRepository;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    #[instrument(skip_all)]
    pub async fn list(&self) -> Result<Vec<Task>, TaskError> {
        self.tasks.get_all().await
    }

    #[instrument(skip_all, fields(task_id = %id))]
    pub async fn get(&self, id: &str) -> Result<Task, TaskError> {
        let id = parse_id(id)?;
        self.tasks.get_by_id(id).await
    }

    #[instrument(skip_all)]
    pub async fn create(&self, input: TaskInput) -> Result<Task, TaskError> {
        validate(&input, Utc::now())?;

        let task = self
            .tasks
            .create(Task {
                id: Uuid::new_v4(),
                title: input.title.trim().to_string(),
                description: input.description,
                due_date: input.due_date,
                status: input.status,
            })
            .await?;

        tracing::info!(target: "task.services.task", task_id = %task.id, "Task created");
        Ok(task)
    }

    #[instrument(skip_all, fields(task_id = %id))]
    pub async fn update(&self, id: &str, input: TaskInput) -> Result<Task, TaskError> {
        let id = parse_id(id)?;
        validate(&input, Utc::now())?;

        self.tasks
            .update(Task {
                id,
                title: input.title.trim().to_string(),
                description: input.description,
                due_date: input.due_date,
                status: input.status,
            })
            .await
    }

    #[instrument(skip_all, fields(task_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), TaskError> {
        let id = parse_id(id)?;
        self.tasks.delete(id).await?;

        tracing::info!(target: "task.services.task", task_id = %id, "Task deleted");
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<Uuid, TaskError> {
    Uuid::parse_str(id).map_err(|_| TaskError::InvalidId(id.to_string()))
}

fn validate(input: &TaskInput, now: DateTime<Utc>) -> Result<(), TaskError> {
    if input.title.trim().is_empty() {
        return Err(TaskError::Validation(
            "task title cannot be empty".to_string(),
        ));
    }
    if input.due_date <= now {
        return Err(TaskError::Validation(
            "due date must be in the future".to_string(),
        ));
    }
    Ok(())
}
