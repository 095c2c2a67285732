//! E2E tests for task CRUD.

use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::json;
use task_test_utils::*;

struct Session {
    server: TestTaskServer,
    token: String,
}

impl Session {
    async fn start() -> Result<Self, anyhow::Error> {
        let server = TestTaskServer::spawn().await?;
        let token = TestTokenBuilder::new()
            .for_user(TEST_USER_ALICE)
            .sign(TEST_JWT_SECRET);
        Ok(Self { server, token })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.url(), path)
    }

    async fn create(&self, body: serde_json::Value) -> Result<reqwest::Response, anyhow::Error> {
        Ok(self
            .server
            .client()
            .post(self.url("/api/tasks"))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?)
    }
}

fn task_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "quarterly numbers",
        "duedate": (Utc::now() + Duration::days(7)).to_rfc3339(),
        "status": "pending",
    })
}

#[tokio::test]
async fn test_create_task_returns_created_with_id() -> Result<(), anyhow::Error> {
    let session = Session::start().await?;

    let response = session.create(task_body("Write report")).await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let task: serde_json::Value = response.json().await?;
    assert!(uuid::Uuid::parse_str(task["id"].as_str().unwrap()).is_ok());
    assert_eq!(task["title"], "Write report");
    assert_eq!(task["status"], "pending");
    assert!(task.get("duedate").is_some());

    Ok(())
}

#[tokio::test]
async fn test_task_lifecycle() -> Result<(), anyhow::Error> {
    let session = Session::start().await?;
    let created: serde_json::Value = session.create(task_body("Draft")).await?.json().await?;
    let path = format!("/api/tasks/{}", created["id"].as_str().unwrap());

    // Read
    let fetched = session.server.get_with_token(&path, &session.token).await?;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(fetched.json::<serde_json::Value>().await?, created);

    // List
    let listed: serde_json::Value = session
        .server
        .get_with_token("/api/tasks", &session.token)
        .await?
        .json()
        .await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    // Update
    let mut change = task_body("Final");
    change["status"] = json!("completed");
    let updated = session
        .server
        .client()
        .put(session.url(&path))
        .bearer_auth(&session.token)
        .json(&change)
        .send()
        .await?;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: serde_json::Value = updated.json().await?;
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "Final");
    assert_eq!(updated["status"], "completed");

    // Delete
    let deleted = session
        .server
        .client()
        .delete(session.url(&path))
        .bearer_auth(&session.token)
        .send()
        .await?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = session.server.get_with_token(&path, &session.token).await?;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_create_task_validation_errors() -> Result<(), anyhow::Error> {
    let session = Session::start().await?;

    let blank_title = session.create(task_body("  ")).await?;
    assert_eq!(blank_title.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = blank_title.json().await?;
    assert_eq!(body["error"]["message"], "task title cannot be empty");

    let mut past = task_body("Late");
    past["duedate"] = json!((Utc::now() - Duration::days(1)).to_rfc3339());
    let past_due = session.create(past).await?;
    assert_eq!(past_due.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_create_task_unknown_status_rejected() -> Result<(), anyhow::Error> {
    let session = Session::start().await?;
    let mut body = task_body("Odd");
    body["status"] = json!("in-progress");

    let response = session.create(body).await?;

    assert!(response.status().is_client_error());
    let listed: serde_json::Value = session
        .server
        .get_with_token("/api/tasks", &session.token)
        .await?
        .json()
        .await?;
    assert_eq!(listed, json!([]));

    Ok(())
}

#[tokio::test]
async fn test_invalid_and_missing_ids() -> Result<(), anyhow::Error> {
    let session = Session::start().await?;

    let invalid = session
        .server
        .get_with_token("/api/tasks/not-a-uuid", &session.token)
        .await?;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = invalid.json().await?;
    assert_eq!(body["error"]["code"], "INVALID_ID");

    let missing = session
        .server
        .get_with_token(&format!("/api/tasks/{MISSING_TASK_ID}"), &session.token)
        .await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let delete_missing = session
        .server
        .client()
        .delete(session.url(&format!("/api/tasks/{MISSING_TASK_ID}")))
        .bearer_auth(&session.token)
        .send()
        .await?;
    assert_eq!(delete_missing.status(), StatusCode::NOT_FOUND);

    Ok(())
}
