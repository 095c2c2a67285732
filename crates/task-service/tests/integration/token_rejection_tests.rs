//! E2E tests for the authentication gate.
//!
//! Every forged or stale token must produce the same generic 401, whatever
//! the underlying verification failure.

use reqwest::StatusCode;
use serde_json::json;
use task_test_utils::*;

async fn assert_rejected(server: &TestTaskServer, token: &str) -> Result<(), anyhow::Error> {
    let response = server.get_with_token("/api/tasks", token).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    assert_eq!(body["error"]["message"], "invalid or expired token");

    Ok(())
}

#[tokio::test]
async fn test_builder_token_with_server_secret_accepted() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = TestTokenBuilder::new()
        .for_user(TEST_USER_ALICE)
        .sign(TEST_JWT_SECRET);

    let response = server.get_with_token("/api/tasks", &token).await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_expired_token_rejected() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = TestTokenBuilder::new().expired().sign(TEST_JWT_SECRET);

    assert_rejected(&server, &token).await
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = TestTokenBuilder::new().sign(OTHER_JWT_SECRET);

    assert_rejected(&server, &token).await
}

#[tokio::test]
async fn test_tampered_payload_rejected() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = server
        .register_and_login(TEST_USER_ALICE, TEST_PASSWORD, None)
        .await?;

    let forged = tamper_payload(
        &token,
        &json!({
            "username": TEST_USER_ALICE,
            "role": ROLE_ADMIN,
            "exp": chrono::Utc::now().timestamp() + 3600,
        }),
    );

    assert_rejected(&server, &forged).await
}

#[tokio::test]
async fn test_unexpected_algorithms_rejected() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;

    for alg in ["none", "HS384", "HS512", "RS256", "ES256", "EdDSA"] {
        let token = TestTokenBuilder::new()
            .with_role(ROLE_ADMIN)
            .with_alg(alg)
            .sign(TEST_JWT_SECRET);
        assert_rejected(&server, &token).await?;
    }

    Ok(())
}

#[tokio::test]
async fn test_token_without_exp_rejected() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = TestTokenBuilder::new().without_exp().sign(TEST_JWT_SECRET);

    assert_rejected(&server, &token).await
}

#[tokio::test]
async fn test_token_without_username_rejected() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = TestTokenBuilder::new().without_username().sign(TEST_JWT_SECRET);

    assert_rejected(&server, &token).await
}

#[tokio::test]
async fn test_garbage_and_oversized_tokens_rejected() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;

    assert_rejected(&server, "not-a-jwt").await?;
    assert_rejected(&server, "a.b.c").await?;
    assert_rejected(&server, &"a".repeat(9000)).await?;

    Ok(())
}

#[tokio::test]
async fn test_missing_or_non_bearer_header_rejected() -> Result<(), anyhow::Error> {
    let server = TestTaskServer::spawn().await?;
    let token = TestTokenBuilder::new().sign(TEST_JWT_SECRET);
    let url = format!("{}/api/tasks", server.url());

    let missing = server.client().get(&url).send().await?;
    let basic = server
        .client()
        .get(&url)
        .header("authorization", format!("Basic {token}"))
        .send()
        .await?;
    let bare = server
        .client()
        .get(&url)
        .header("authorization", token.as_str())
        .send()
        .await?;

    for response in [missing, basic, bare] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json().await?;
        assert_eq!(body["error"]["code"], "MISSING_TOKEN");
    }

    Ok(())
}
