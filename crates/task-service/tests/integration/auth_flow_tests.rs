//! E2E tests for registration and login.
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use reqwest::StatusCode;
use serde_json::json;
use task_test_utils::*;

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_happy_path() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;

    let response = server.register(TEST_USER_ALICE, TEST_PASSWORD, None).await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "user registered successfully");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_username_conflict() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    server.register(TEST_USER_ALICE, TEST_PASSWORD, None).await?;

    let response = server.register(TEST_USER_ALICE, "different", Some(ROLE_ADMIN)).await?;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "USER_EXISTS");

    // The original account is untouched
    let login = server.login(TEST_USER_ALICE, TEST_PASSWORD).await?;
    assert_eq!(login.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_register_unknown_role_bad_request() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;

    let response = server.register(TEST_USER_ALICE, TEST_PASSWORD, Some("superuser")).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    Ok(())
}

#[tokio::test]
async fn test_register_blank_username_bad_request() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;

    let response = server.register("   ", TEST_PASSWORD, None).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_register_malformed_body_rejected() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/register", server.url()))
        .header("content-type", "application/json")
        .body("{\"username\":")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_returns_token_with_stored_role() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;

    let token = server
        .register_and_login(TEST_ADMIN_ROOT, TEST_PASSWORD, Some(ROLE_ADMIN))
        .await?;

    token
        .assert_valid_jwt()
        .assert_for_user(TEST_ADMIN_ROOT)
        .assert_has_role(ROLE_ADMIN)
        .assert_expires_in(86_400);

    Ok(())
}

#[tokio::test]
async fn test_login_default_role_is_user() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;

    let token = server
        .register_and_login(TEST_USER_ALICE, TEST_PASSWORD, None)
        .await?;

    token.assert_has_role(ROLE_USER);

    Ok(())
}

#[tokio::test]
async fn test_login_respects_configured_ttl() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn_with_vars(
        [("JWT_TTL_SECONDS".to_string(), "120".to_string())].into(),
    )
    .await?;

    let token = server
        .register_and_login(TEST_USER_ALICE, TEST_PASSWORD, None)
        .await?;

    token.assert_expires_in(120);

    Ok(())
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    server.register(TEST_USER_ALICE, TEST_PASSWORD, None).await?;

    let wrong_password = server.login(TEST_USER_ALICE, "wrong").await?;
    let unknown_user = server.login("nobody", TEST_PASSWORD).await?;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await?;
    let unknown_user: serde_json::Value = unknown_user.json().await?;
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["error"]["code"], "INVALID_CREDENTIALS");

    Ok(())
}

#[tokio::test]
async fn test_login_token_opens_protected_routes() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = server
        .register_and_login(TEST_USER_BOB, TEST_PASSWORD, None)
        .await?;

    let response = server.get_with_token("/api/tasks", &token).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>().await?, json!([]));

    Ok(())
}
