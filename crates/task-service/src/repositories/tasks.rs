//! Task repository.

use crate::errors::TaskError;
use crate::models::Task;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Task storage (enables mocking).
#[async_trait::async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks, in insertion order.
    async fn get_all(&self) -> Result<Vec<Task>, TaskError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Task, TaskError>;

    async fn create(&self, task: Task) -> Result<Task, TaskError>;

    /// Replace the stored task with the same id.
    async fn update(&self, task: Task) -> Result<Task, TaskError>;

    async fn delete(&self, id: Uuid) -> Result<(), TaskError>;
}

/// In-memory task storage.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn get_all(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Task, TaskError> {
        self.tasks
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(TaskError::NotFound)
    }

    async fn create(&self, task: Task) -> Result<Task, TaskError> {
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let mut tasks = self.tasks.write().await;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(TaskError::NotFound)?;
        *slot = task.clone();
        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> Result<(), TaskError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(TaskError::NotFound);
        }
        Ok(())
    }
}

pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock task repository for unit testing.
    pub struct MockTaskRepository {
        inner: InMemoryTaskRepository,
        call_count: AtomicUsize,
        return_error: bool,
    }

    impl MockTaskRepository {
        /// Create a mock that behaves like an empty store.
        pub fn empty() -> Self {
            Self {
                inner: InMemoryTaskRepository::new(),
                call_count: AtomicUsize::new(0),
                return_error: false,
            }
        }

        /// Create a mock whose every call fails with a repository error.
        pub fn failing() -> Self {
            Self {
                return_error: true,
                ..Self::empty()
            }
        }

        /// Total number of calls made, across all operations.
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        fn record(&self) -> Result<(), TaskError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.return_error {
                return Err(TaskError::Repository("Mock task repository error".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl TaskRepository for MockTaskRepository {
        async fn get_all(&self) -> Result<Vec<Task>, TaskError> {
            self.record()?;
            self.inner.get_all().await
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Task, TaskError> {
            self.record()?;
            self.inner.get_by_id(id).await
        }

        async fn create(&self, task: Task) -> Result<Task, TaskError> {
            self.record()?;
            self.inner.create(task).await
        }

        async fn update(&self, task: Task) -> Result<Task, TaskError> {
            self.record()?;
            self.inner.update(task).await
        }

        async fn delete(&self, id: Uuid) -> Result<(), TaskError> {
            self.record()?;
            self.inner.delete(id).await
        }
    }
}
