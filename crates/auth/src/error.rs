//! Auth Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Another user already registered this email address
    #[error("A user with this email address already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password; the two are deliberately collapsed
    /// so callers cannot enumerate registered emails
    #[error("Email or password is incorrect")]
    InvalidCredentials,

    /// No user with the requested id
    #[error("User not found")]
    NoRecord,

    /// The credential store did not answer within the request deadline
    #[error("Credential store timed out")]
    Timeout,

    /// Database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status code for this error when it escapes a handler unmapped.
    ///
    /// Handlers intercept the form-level variants (`DuplicateEmail`,
    /// `InvalidCredentials`) and re-render with 422; these mappings are the
    /// fallback for programmatic access.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::NoRecord => StatusCode::NOT_FOUND,
            AuthError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicateEmail => ErrorKind::Conflict,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::NoRecord => ErrorKind::NotFound,
            AuthError::Timeout => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Backend detail stays out of the message; the
    /// user sees only the generic reason phrase for server errors.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Something went wrong")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with the appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Credential store database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Timeout => {
                tracing::error!("Credential store timed out");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AuthError::NoRecord,
            // A distinguishable timeout instead of a hang or a generic error
            sqlx::Error::PoolTimedOut => AuthError::Timeout,
            other => AuthError::Database(other),
        }
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
