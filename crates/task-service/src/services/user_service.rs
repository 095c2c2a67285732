//! Account registration and login.

use crate::errors::TaskError;
use crate::models::{LoginRequest, LoginResponse, RegistrationRequest, Role, User};
use crate::observability::hash_for_correlation;
use crate::observability::metrics::record_login_attempt;
use crate::repositories::UserRepository;
use crate::services::{PasswordService, TokenService};
use common::secret::ExposeSecret;
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new account.
    ///
    /// # Steps
    ///
    /// 1. Reject blank username or password
    /// 2. Resolve role (absent or empty → `user`; unknown → 400)
    /// 3. Hash password
    /// 4. Persist (duplicate username → 409)
    #[instrument(skip_all, fields(user = %hash_for_correlation(&request.username)))]
    pub async fn register(&self, request: RegistrationRequest) -> Result<User, TaskError> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(TaskError::Validation("username is required".to_string()));
        }
        if request.password.expose_secret().is_empty() {
            return Err(TaskError::Validation("password is required".to_string()));
        }

        let role = match request.role.as_deref().map(str::trim) {
            None | Some("") => Role::default(),
            Some(raw) => Role::from_str(raw).map_err(TaskError::Validation)?,
        };

        let password_hash = self.passwords.hash(request.password.expose_secret())?;

        let user = self
            .users
            .create(User {
                id: Uuid::new_v4(),
                username: username.to_string(),
                password_hash,
                role,
            })
            .await?;

        tracing::info!(
            target: "task.services.user",
            role = user.role.as_str(),
            "User registered"
        );

        Ok(user)
    }

    /// Authenticate and issue a session token.
    ///
    /// Unknown usernames and wrong passwords both return
    /// `TaskError::InvalidCredentials`, after the same amount of bcrypt work.
    #[instrument(skip_all, fields(user = %hash_for_correlation(&request.username)))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, TaskError> {
        if request.username.trim().is_empty() || request.password.expose_secret().is_empty() {
            return Err(TaskError::Validation(
                "username and password are required".to_string(),
            ));
        }

        let user = match self.users.find_by_username(request.username.trim()).await {
            Ok(user) => Some(user),
            Err(TaskError::NotFound) => None,
            Err(e) => {
                record_login_attempt("error");
                return Err(e);
            }
        };

        // Unknown usernames verify against the dummy hash so both failure
        // paths cost one bcrypt run at the configured cost
        let hash_to_verify = user
            .as_ref()
            .map_or(self.passwords.dummy_hash(), |u| u.password_hash.as_str());
        let is_valid = self
            .passwords
            .verify(request.password.expose_secret(), hash_to_verify);

        let user = match user {
            Some(user) if is_valid => user,
            _ => {
                tracing::debug!(target: "task.services.user", "Login rejected: invalid credentials");
                record_login_attempt("invalid_credentials");
                return Err(TaskError::InvalidCredentials);
            }
        };

        let token = self
            .tokens
            .issue(&user.username, user.role.as_str())
            .map_err(|e| {
                tracing::error!(target: "task.services.user", error = %e, "Token issuance failed");
                record_login_attempt("error");
                TaskError::from(e)
            })?;

        record_login_attempt("success");
        tracing::info!(target: "task.services.user", role = user.role.as_str(), "User logged in");

        Ok(LoginResponse { token })
    }
}
