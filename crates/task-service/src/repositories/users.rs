//! User repository.
//!
//! Usernames are unique; lookups are exact (case-sensitive).

use crate::errors::TaskError;
use crate::models::User;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Account storage (enables mocking).
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user.
    ///
    /// Returns `TaskError::UserAlreadyExists` if the username is taken.
    async fn create(&self, user: User) -> Result<User, TaskError>;

    /// Look up a user by username.
    ///
    /// Returns `TaskError::NotFound` if no such user exists.
    async fn find_by_username(&self, username: &str) -> Result<User, TaskError>;
}

/// In-memory user storage keyed by username.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, TaskError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(TaskError::UserAlreadyExists);
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, TaskError> {
        self.users
            .read()
            .await
            .get(username)
            .cloned()
            .ok_or(TaskError::NotFound)
    }
}

pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock user repository for unit testing.
    ///
    /// Backed by a real in-memory store unless constructed with `failing()`.
    pub struct MockUserRepository {
        inner: InMemoryUserRepository,
        create_calls: AtomicUsize,
        find_calls: AtomicUsize,
        return_error: bool,
    }

    impl MockUserRepository {
        /// Create a mock that behaves like an empty store.
        pub fn empty() -> Self {
            Self {
                inner: InMemoryUserRepository::new(),
                create_calls: AtomicUsize::new(0),
                find_calls: AtomicUsize::new(0),
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

        /// Number of `create` calls made.
        pub fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        /// Number of `find_by_username` calls made.
        pub fn find_calls(&self) -> usize {
            self.find_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl UserRepository for MockUserRepository {
        async fn create(&self, user: User) -> Result<User, TaskError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.return_error {
                return Err(TaskError::Repository("Mock user repository error".to_string()));
            }
            self.inner.create(user).await
        }

        async fn find_by_username(&self, username: &str) -> Result<User, TaskError> {
            self.find_calls.fetch_add(1, Ordering::SeqCst);
            if self.return_error {
                return Err(TaskError::Repository("Mock user repository error".to_string()));
            }
            self.inner.find_by_username(username).await
        }
    }
}
