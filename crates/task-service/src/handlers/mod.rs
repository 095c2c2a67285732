//! HTTP request handlers for the task service.

pub mod admin_handler;
pub mod auth_handler;
pub mod health;
pub mod metrics;
pub mod task_handler;

pub use admin_handler::admin_dashboard;
pub use auth_handler::{handle_login, handle_register};
pub use health::health_check;
pub use metrics::metrics_handler;
pub use task_handler::{create_task, delete_task, get_task, list_tasks, update_task};

use crate::errors::TaskError;
use crate::observability::metrics::record_error;
use crate::observability::ErrorCategory;

/// Record a failed operation in metrics and hand the error back unchanged.
fn observe_error(operation: &'static str) -> impl Fn(TaskError) -> TaskError {
    move |err| {
        record_error(
            operation,
            ErrorCategory::from(&err).as_str(),
            err.status_code().as_u16(),
        );
        err
    }
}
