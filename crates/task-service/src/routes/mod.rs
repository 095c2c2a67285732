//! HTTP routes for the task service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::errors::TaskError;
use crate::handlers;
use crate::middleware::{
    http_metrics_middleware, require_auth, require_role, AuthState, RequiredRole,
};
use crate::models::Role;
use crate::repositories::{InMemoryTaskRepository, InMemoryUserRepository};
use crate::services::{BcryptPasswordService, JwtTokenService, TaskService, TokenService, UserService};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registration and login.
    pub users: Arc<UserService>,

    /// Task CRUD.
    pub tasks: Arc<TaskService>,

    /// Token verification for the authentication gate.
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Wire the services over in-memory storage.
    ///
    /// Consumes the config so the signing secret moves into the token
    /// service and nowhere else.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::HashingFailure` if the bcrypt cost is unusable.
    pub fn in_memory(config: Config) -> Result<Self, TaskError> {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
            config.jwt_secret,
            config.jwt_ttl_seconds,
        ));
        let users = UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(BcryptPasswordService::new(config.bcrypt_cost)?),
            tokens.clone(),
        );
        let tasks = TaskService::new(Arc::new(InMemoryTaskRepository::new()));

        Ok(Self {
            users: Arc::new(users),
            tasks: Arc::new(tasks),
            tokens,
        })
    }
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/register`, `/login` - account endpoints - public
/// - `/health` - liveness probe - public
/// - `/metrics` - Prometheus scrape endpoint - public
/// - `/api/tasks`, `/api/tasks/:id` - task CRUD - requires authentication
/// - `/api/admin/dashboard` - requires authentication and the `admin` role
/// - TraceLayer for request logging
/// - HTTP metrics middleware
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let auth_state = Arc::new(AuthState {
        tokens: state.tokens.clone(),
    });

    let public_routes = Router::new()
        .route("/register", post(handlers::handle_register))
        .route("/login", post(handlers::handle_login))
        .route("/health", get(handlers::health_check))
        .with_state(state.clone());

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Role gate runs inside the authentication gate
    let admin_routes = Router::new()
        .route("/api/admin/dashboard", get(handlers::admin_dashboard))
        .route_layer(middleware::from_fn_with_state(
            RequiredRole(Role::Admin.as_str()),
            require_role,
        ));

    let protected_routes = Router::new()
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/tasks/:id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(state);

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer (innermost)
    // 2. TraceLayer
    // 3. http_metrics_middleware (outermost, sees every response)
    public_routes
        .merge(metrics_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(middleware::from_fn(http_metrics_middleware))
}
