//! Test server harness for E2E testing
//!
//! Provides `TestTaskServer` for spawning real task-service instances in tests.

use crate::test_ids::{TEST_BCRYPT_COST, TEST_JWT_SECRET};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use task_service::config::Config;
use task_service::observability::metrics::init_metrics_recorder;
use task_service::routes::{self, AppState};
use tokio::task::JoinHandle;

/// Test harness for spawning the task service in E2E tests.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_health_flow_e2e() -> Result<()> {
///     let server = TestTaskServer::spawn().await?;
///
///     let response = server.client().get(format!("{}/health", server.url())).send().await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestTaskServer {
    addr: SocketAddr,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestTaskServer {
    /// Spawn a server signing with `TEST_JWT_SECRET` and the default token TTL.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_vars(HashMap::new()).await
    }

    /// Spawn a server with extra configuration variables layered over the
    /// test defaults (e.g. `JWT_TTL_SECONDS`).
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    pub async fn spawn_with_vars(overrides: HashMap<String, String>) -> Result<Self, anyhow::Error> {
        let mut vars = HashMap::from([
            ("JWT_SECRET".to_string(), TEST_JWT_SECRET.to_string()),
            ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
            ("BCRYPT_COST".to_string(), TEST_BCRYPT_COST.to_string()),
        ]);
        vars.extend(overrides);

        let config = Config::from_vars(&vars)
            .map_err(|e| anyhow::anyhow!("Failed to create config: {}", e))?;

        // The global recorder can only be installed once per process; later
        // servers get a standalone handle.
        let metrics_handle = match init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                use metrics_exporter_prometheus::PrometheusBuilder;
                PrometheusBuilder::new().build_recorder().handle()
            }
        };

        let state = Arc::new(
            AppState::in_memory(config)
                .map_err(|e| anyhow::anyhow!("Failed to initialize services: {}", e))?,
        );
        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Get the base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shared HTTP client.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST /register. The response is returned unchecked.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let mut body = json!({ "username": username, "password": password });
        if let (Some(role), Some(map)) = (role, body.as_object_mut()) {
            map.insert("role".to_string(), json!(role));
        }

        Ok(self
            .client
            .post(format!("{}/register", self.url()))
            .json(&body)
            .send()
            .await?)
    }

    /// POST /login. The response is returned unchecked.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<reqwest::Response, anyhow::Error> {
        Ok(self
            .client
            .post(format!("{}/login", self.url()))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    /// Register an account, log in, and return the session token.
    pub async fn register_and_login(
        &self,
        username: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<String, anyhow::Error> {
        let registered = self.register(username, password, role).await?;
        anyhow::ensure!(
            registered.status() == reqwest::StatusCode::CREATED,
            "registration failed with {}",
            registered.status()
        );

        let response = self.login(username, password).await?;
        anyhow::ensure!(
            response.status() == reqwest::StatusCode::OK,
            "login failed with {}",
            response.status()
        );

        let body: serde_json::Value = response.json().await?;
        body.get("token")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| anyhow::anyhow!("login response has no token: {body}"))
    }

    /// Send an authenticated GET.
    pub async fn get_with_token(
        &self,
        path: &str,
        token: &str,
    ) -> Result<reqwest::Response, anyhow::Error> {
        Ok(self
            .client
            .get(format!("{}{}", self.url(), path))
            .bearer_auth(token)
            .send()
            .await?)
    }
}

impl Drop for TestTaskServer {
    fn drop(&mut self) {
        self._handle.abort();
    }
}
