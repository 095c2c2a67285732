//! Metrics definitions for the task service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `task_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `status`: success, error
//! - `error_category`: the token error labels plus `none`
//! - `decision`: allowed, denied
//! - `path`: known routes, `/api/tasks/:id`, or `/other`

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the Prometheus recorder and return the handle used by `/metrics`.
///
/// Must be called before any metrics are recorded.
///
/// # Errors
///
/// Returns error if the recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        // bcrypt at cost 10-14 lands between ~50ms and ~1s
        .set_buckets_for_metric(
            Matcher::Prefix("task_password".to_string()),
            &[0.010, 0.050, 0.100, 0.250, 0.500, 1.000, 2.500],
        )
        .map_err(|e| format!("Failed to set password hashing buckets: {e}"))?
        .set_buckets_for_metric(
            Matcher::Prefix("task_http".to_string()),
            &[
                0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000, 2.500, 5.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP latency buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus metrics recorder: {e}"))
}

// ============================================================================
// Token Metrics
// ============================================================================

/// Record token issuance outcome
///
/// Metric: `task_token_issuance_total`
/// Labels: `status`
pub fn record_token_issuance(status: &str) {
    counter!("task_token_issuance_total", "status" => status.to_string()).increment(1);
}

/// Record token validation result
///
/// Metric: `task_token_validations_total`
/// Labels: `status`, `error_category`
pub fn record_token_validation(status: &str, error_category: Option<&str>) {
    let category = error_category.unwrap_or("none");
    counter!("task_token_validations_total", "status" => status.to_string(), "error_category" => category.to_string())
        .increment(1);
}

// ============================================================================
// Credential Metrics
// ============================================================================

/// Record bcrypt operation duration
///
/// Metric: `task_password_hash_duration_seconds`
/// Labels: `operation` (hash, verify)
pub fn record_password_hash(operation: &str, duration: Duration) {
    histogram!("task_password_hash_duration_seconds", "operation" => operation.to_string())
        .record(duration.as_secs_f64());
}

/// Record login attempt outcome
///
/// Metric: `task_login_attempts_total`
/// Labels: `status`
pub fn record_login_attempt(status: &str) {
    counter!("task_login_attempts_total", "status" => status.to_string()).increment(1);
}

// ============================================================================
// Authorization Metrics
// ============================================================================

/// Record role gate decision
///
/// Metric: `task_authorization_decisions_total`
/// Labels: `required_role`, `decision`
pub fn record_authorization_decision(required_role: &str, decision: &str) {
    counter!("task_authorization_decisions_total",
        "required_role" => required_role.to_string(),
        "decision" => decision.to_string()
    )
    .increment(1);
}

// ============================================================================
// Error Metrics
// ============================================================================

/// Record a handler error by category
///
/// Metric: `task_errors_total`
/// Labels: `operation`, `error_category`, `status_code`
pub fn record_error(operation: &str, error_category: &str, status_code: u16) {
    counter!("task_errors_total",
        "operation" => operation.to_string(),
        "error_category" => error_category.to_string(),
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metric: `task_http_requests_total`, `task_http_request_duration_seconds`
/// Labels: `method`, `path`, `status_code`
///
/// Captures framework-level rejections too (415, 400 on JSON errors, 404, 405).
pub fn record_http_request(method: &str, path: &str, status_code: u16, duration: Duration) {
    let normalized_path = normalize_path(path);

    histogram!("task_http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => normalized_path.clone(),
        "status_code" => status_code.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("task_http_requests_total",
        "method" => method.to_string(),
        "path" => normalized_path,
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Normalize path to bound label cardinality.
fn normalize_path(path: &str) -> String {
    match path {
        "/health" | "/metrics" | "/register" | "/login" | "/api/tasks"
        | "/api/admin/dashboard" => path.to_string(),
        _ => normalize_dynamic_path(path),
    }
}

/// `/api/tasks/{uuid}` → `/api/tasks/:id`; anything else → `/other`.
fn normalize_dynamic_path(path: &str) -> String {
    match path.strip_prefix("/api/tasks/") {
        Some(segment) if uuid::Uuid::try_parse(segment).is_ok() => "/api/tasks/:id".to_string(),
        _ => "/other".to_string(),
    }
}
