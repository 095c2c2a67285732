use crate::middleware::VerifiedIdentity;
use crate::models::MessageResponse;
use crate::observability::hash_for_correlation;
use axum::{Extension, Json};

/// Handler for GET /api/admin/dashboard
///
/// Reachable only through the admin role gate.
pub async fn admin_dashboard(
    Extension(identity): Extension<VerifiedIdentity>,
) -> Json<MessageResponse> {
    tracing::debug!(
        target: "task.handler.admin",
        user = %hash_for_correlation(&identity.username),
        "Admin dashboard served"
    );
    Json(MessageResponse::new("Welcome Admin"))
}
