//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{Email, UserName};

/// A registered user.
///
/// The id is immutable and assigned by the store. `password_hash` is the
/// only credential material that ever exists at rest; its Debug output is
/// redacted and the plaintext is unrecoverable.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    #[test]
    fn test_debug_never_exposes_hash() {
        let user = User {
            id: UserId::from_i64(1),
            name: UserName::from_db("Alice"),
            email: Email::from_db("alice@example.com"),
            password_hash: ClearTextPassword::new_unchecked("secret-password".into())
                .hash()
                .unwrap(),
            created_at: Utc::now(),
        };

        let debug = format!("{user:?}");
        assert!(!debug.contains("argon2"));
        assert!(debug.contains("alice@example.com"));
    }
}
