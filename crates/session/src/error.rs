//! Session Error Types

use thiserror::Error;

/// Session-specific result type alias
pub type SessionResult<T> = Result<T, SessionError>;

/// Session store failures
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend did not answer within the request deadline
    #[error("Session store timed out")]
    Timeout,

    /// Session data could not be (de)serialized
    #[error("Session data serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend failure
    #[error("Session store error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for SessionError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            // Deadline exhaustion is distinguishable from other backend
            // failures so callers never mistake it for data corruption.
            sqlx::Error::PoolTimedOut => SessionError::Timeout,
            other => SessionError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_distinguishable() {
        let err: SessionError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, SessionError::Timeout));

        let err: SessionError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, SessionError::Database(_)));
    }
}
