//! Snippet Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Snippet-specific result type alias
pub type SnippetResult<T> = Result<T, SnippetError>;

/// Snippet store failures
#[derive(Debug, Error)]
pub enum SnippetError {
    /// No snippet with the requested id (or it has expired)
    #[error("Snippet not found")]
    NoRecord,

    /// The store did not answer within the request deadline
    #[error("Snippet store timed out")]
    Timeout,

    /// Database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl SnippetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SnippetError::NoRecord => ErrorKind::NotFound,
            SnippetError::Timeout => ErrorKind::ServiceUnavailable,
            SnippetError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            SnippetError::Database(e) => {
                tracing::error!(error = %e, "Snippet store database error");
            }
            SnippetError::Timeout => {
                tracing::error!("Snippet store timed out");
            }
            SnippetError::NoRecord => {
                tracing::debug!("Snippet not found");
            }
        }
    }
}

impl IntoResponse for SnippetError {
    fn into_response(self) -> Response {
        self.log();
        let message = match &self {
            // Backend detail stays in the logs
            SnippetError::Database(_) => "Something went wrong".to_string(),
            other => other.to_string(),
        };
        AppError::new(self.kind(), message).into_response()
    }
}

impl From<sqlx::Error> for SnippetError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => SnippetError::NoRecord,
            sqlx::Error::PoolTimedOut => SnippetError::Timeout,
            other => SnippetError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(SnippetError::NoRecord.kind(), ErrorKind::NotFound);
        assert_eq!(SnippetError::Timeout.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(
            SnippetError::Database(sqlx::Error::RowNotFound).kind(),
            ErrorKind::InternalServerError
        );
    }
}
