//! Storage layer.
//!
//! Each repository is a narrow async trait with an in-memory implementation
//! guarded by `tokio::sync::RwLock`, plus a `mock` module of test doubles.

pub mod tasks;
pub mod users;

pub use tasks::{InMemoryTaskRepository, TaskRepository};
pub use users::{InMemoryUserRepository, UserRepository};
