/// Unified Error Handling Module
///
/// Domain-specific error enums unified under a single `AppError` that maps
/// onto the HTTP response contract: every failure body is the
/// `{"response": ..., "success": false}` envelope the clients consume.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

/// Validation errors for input data
#[derive(Debug, Clone)]
pub enum ValidationError {
    EmptyField(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} is required", field),
        }
    }
}

impl StdError for ValidationError {}

/// Storage operation errors
#[derive(Debug)]
pub enum StoreError {
    /// Write rejected by a uniqueness constraint (duplicate username).
    UniqueConstraintViolation(String),
    /// More than one account holds the same access token. The lookup fails
    /// closed instead of picking one of them.
    TokenCollision,
    /// Pool exhausted, connection refused, or query timed out.
    Unavailable(String),
    UnexpectedError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UniqueConstraintViolation(msg) => write!(f, "Duplicate entry: {}", msg),
            StoreError::TokenCollision => {
                write!(f, "Access token lookup matched more than one account")
            }
            StoreError::Unavailable(msg) => write!(f, "Database unavailable: {}", msg),
            StoreError::UnexpectedError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl StdError for StoreError {}

/// Authentication errors
#[derive(Debug)]
pub enum AuthError {
    /// The presented access token matches no account (or no token was sent).
    NotLoggedIn,
    /// Username unknown or password mismatch. One message for both cases.
    InvalidCredentials,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotLoggedIn => write!(f, "Please, log in"),
            AuthError::InvalidCredentials => write!(f, "User or password not found"),
        }
    }
}

impl StdError for AuthError {}

/// Central error type that all application errors map to
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    Store(StoreError),
    Auth(AuthError),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Store(e) => write!(f, "{}", e),
            AppError::Auth(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                // 23505 = unique_violation
                if db_err.code().as_deref() == Some("23505") {
                    AppError::Store(StoreError::UniqueConstraintViolation(
                        db_err.to_string(),
                    ))
                } else {
                    AppError::Store(StoreError::UnexpectedError(db_err.to_string()))
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::Store(StoreError::Unavailable(err.to_string()))
            }
            _ => AppError::Store(StoreError::UnexpectedError(err.to_string())),
        }
    }
}

impl AppError {
    fn log(&self) {
        match self {
            AppError::Validation(e) => {
                tracing::warn!(error = %e, "Validation error");
            }
            AppError::Store(StoreError::UniqueConstraintViolation(_)) => {
                tracing::warn!(error = %self, "Duplicate entry attempt");
            }
            AppError::Store(StoreError::TokenCollision) => {
                tracing::error!(error = %self, "Access token consistency fault");
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "Database error");
            }
            AppError::Auth(e) => {
                tracing::warn!(error = %e, "Authentication failure");
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
            }
        }
    }
}

/// Actix-web integration: every error renders as the response envelope.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.log();

        let body = match self {
            // The gate's rejection carries a nested message object.
            AppError::Auth(AuthError::NotLoggedIn) => serde_json::json!({
                "response": { "message": self.to_string() },
                "success": false
            }),
            _ => serde_json::json!({
                "response": self.to_string(),
                "success": false
            }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
