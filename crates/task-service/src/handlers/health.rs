//! Liveness probe.

/// Handler for GET /health
///
/// Returns "OK" while the process is serving. No dependency checks: all
/// storage is in-process.
pub async fn health_check() -> &'static str {
    "OK"
}
