//! User Name Value Object
//!
//! The display name shown on a user's snippets. Free-form apart from being
//! non-blank and bounded; it carries no uniqueness constraint.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum display name length
const NAME_MAX_LENGTH: usize = 255;

/// Display name value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(AppError::unprocessable("Name cannot be blank"));
        }

        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(AppError::unprocessable(format!(
                "Name must be at most {} characters",
                NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name))
    }

    /// Create from a database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_valid() {
        assert_eq!(UserName::new("Bob").unwrap().as_str(), "Bob");
        assert_eq!(UserName::new("  Bob  ").unwrap().as_str(), "Bob");
    }

    #[test]
    fn test_user_name_invalid() {
        assert!(UserName::new("").is_err());
        assert!(UserName::new("   ").is_err());
        assert!(UserName::new("x".repeat(256)).is_err());
    }

    #[test]
    fn test_user_name_length_boundary() {
        assert!(UserName::new("x".repeat(255)).is_ok());
    }
}
