//! E2E tests for the admin role gate.

use reqwest::StatusCode;
use serde_json::json;
use task_test_utils::*;

const DASHBOARD: &str = "/api/admin/dashboard";

#[tokio::test]
async fn test_dashboard_admin_allowed() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = server
        .register_and_login(TEST_ADMIN_ROOT, TEST_PASSWORD, Some(ROLE_ADMIN))
        .await?;

    let response = server.get_with_token(DASHBOARD, &token).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Welcome Admin");

    Ok(())
}

#[tokio::test]
async fn test_dashboard_user_role_forbidden() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = TestTokenBuilder::new()
        .for_user(TEST_USER_ALICE)
        .with_role(ROLE_USER)
        .sign(TEST_JWT_SECRET);

    let response = server.get_with_token(DASHBOARD, &token).await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "ROLE_MISMATCH");
    assert_eq!(body["error"]["required_role"], ROLE_ADMIN);

    Ok(())
}

#[tokio::test]
async fn test_dashboard_expired_admin_token_unauthorized() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = TestTokenBuilder::new()
        .for_user(TEST_ADMIN_ROOT)
        .with_role(ROLE_ADMIN)
        .expired()
        .sign(TEST_JWT_SECRET);

    let response = server.get_with_token(DASHBOARD, &token).await?;

    // Authentication fails first, so the role gate never answers
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_dashboard_missing_or_malformed_role_forbidden() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;

    let tokens = [
        TestTokenBuilder::new().without_role().sign(TEST_JWT_SECRET),
        TestTokenBuilder::new()
            .with_role_value(json!(1))
            .sign(TEST_JWT_SECRET),
        TestTokenBuilder::new()
            .with_role_value(json!(["admin"]))
            .sign(TEST_JWT_SECRET),
        TestTokenBuilder::new().with_role("Admin").sign(TEST_JWT_SECRET),
    ];

    for token in tokens {
        let response = server.get_with_token(DASHBOARD, &token).await?;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    Ok(())
}

#[tokio::test]
async fn test_malformed_role_still_authenticates() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = TestTokenBuilder::new()
        .with_role_value(json!({"name": "admin"}))
        .sign(TEST_JWT_SECRET);

    let response = server.get_with_token("/api/tasks", &token).await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
