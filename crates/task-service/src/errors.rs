use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Missing or malformed Authorization header")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Role mismatch: required {required}")]
    RoleMismatch { required: String },

    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Resource not found")]
    NotFound,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Internal server error")]
    Internal,
}

/// Token verification outcomes.
///
/// Every variant except `Signing` collapses to `TaskError::InvalidToken` at
/// the HTTP boundary; the distinction is kept for logs, metrics and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token declares an unexpected algorithm")]
    UnexpectedAlgorithm,

    #[error("token has expired")]
    Expired,

    #[error("token signing failed: {0}")]
    Signing(String),
}

impl TokenError {
    /// Bounded label for metrics and logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::BadSignature => "bad_signature",
            TokenError::UnexpectedAlgorithm => "unexpected_algorithm",
            TokenError::Expired => "expired",
            TokenError::Signing(_) => "signing",
        }
    }
}

impl From<TokenError> for TaskError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) => TaskError::Internal,
            _ => TaskError::InvalidToken,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_role: Option<String>,
}

impl TaskError {
    /// Machine-readable error code used in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            TaskError::MissingToken => "MISSING_TOKEN",
            TaskError::InvalidToken => "INVALID_TOKEN",
            TaskError::RoleMismatch { .. } => "ROLE_MISMATCH",
            TaskError::HashingFailure(_) => "CRYPTO_ERROR",
            TaskError::InvalidCredentials => "INVALID_CREDENTIALS",
            TaskError::UserAlreadyExists => "USER_EXISTS",
            TaskError::NotFound => "NOT_FOUND",
            TaskError::InvalidId(_) => "INVALID_ID",
            TaskError::Validation(_) => "VALIDATION_ERROR",
            TaskError::Repository(_) => "REPOSITORY_ERROR",
            TaskError::Internal => "INTERNAL_ERROR",
        }
    }
}

impl TaskError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskError::MissingToken | TaskError::InvalidToken | TaskError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            TaskError::RoleMismatch { .. } => StatusCode::FORBIDDEN,
            TaskError::UserAlreadyExists => StatusCode::CONFLICT,
            TaskError::NotFound => StatusCode::NOT_FOUND,
            TaskError::InvalidId(_) | TaskError::Validation(_) => StatusCode::BAD_REQUEST,
            TaskError::HashingFailure(_) | TaskError::Repository(_) | TaskError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let message = match &self {
            TaskError::MissingToken => "missing token".to_string(),
            TaskError::InvalidToken => "invalid or expired token".to_string(),
            TaskError::RoleMismatch { required } => format!("{required} access required"),
            TaskError::HashingFailure(_) => "An internal cryptographic error occurred".to_string(),
            TaskError::InvalidCredentials => "invalid username or password".to_string(),
            TaskError::UserAlreadyExists => "user already exists".to_string(),
            TaskError::NotFound => "not found".to_string(),
            TaskError::InvalidId(id) => format!("invalid id: {id}"),
            TaskError::Validation(reason) => reason.clone(),
            TaskError::Repository(_) => "An internal storage error occurred".to_string(),
            TaskError::Internal => "An internal error occurred".to_string(),
        };
        let required_role = match &self {
            TaskError::RoleMismatch { required } => Some(required.clone()),
            _ => None,
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
                required_role,
            },
        };

        (self.status_code(), Json(error_response)).into_response()
    }
}
