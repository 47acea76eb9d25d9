//! Deterministic Credential Store Double
//!
//! Fixed-behavior fake implementing the identical [`UserStore`] contract,
//! for tests and database-free development. Fixture semantics:
//! `exists@gmail.com` is the one registered account, its password is
//! `password`, its id is `1`.

use std::sync::OnceLock;

use chrono::{TimeZone, Utc};
use kernel::id::UserId;
use platform::password::{ClearTextPassword, HashedPassword};

use crate::domain::repository::UserStore;
use crate::domain::user::User;
use crate::domain::value_object::{Email, UserName};
use crate::error::{AuthError, AuthResult};

const EXISTING_EMAIL: &str = "exists@gmail.com";
const EXISTING_PASSWORD: &str = "password";
const EXISTING_ID: i64 = 1;

/// Deterministic in-memory credential store
#[derive(Clone, Copy, Default)]
pub struct MockUserStore;

impl MockUserStore {
    pub fn new() -> Self {
        Self
    }

    fn existing_user() -> User {
        // Hash once per process; Argon2 is slow by design
        static HASH: OnceLock<HashedPassword> = OnceLock::new();
        let password_hash = HASH
            .get_or_init(|| {
                ClearTextPassword::new_unchecked(EXISTING_PASSWORD.to_string())
                    .hash()
                    .expect("fixture password hashes")
            })
            .clone();

        User {
            id: UserId::from_i64(EXISTING_ID),
            name: UserName::from_db("Existing User"),
            email: Email::from_db(EXISTING_EMAIL),
            password_hash,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }
}

impl UserStore for MockUserStore {
    async fn insert(
        &self,
        _name: &UserName,
        email: &Email,
        _password: ClearTextPassword,
    ) -> AuthResult<UserId> {
        match email.as_str() {
            EXISTING_EMAIL => Err(AuthError::DuplicateEmail),
            _ => Ok(UserId::from_i64(2)),
        }
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: ClearTextPassword,
    ) -> AuthResult<UserId> {
        if email.as_str() == EXISTING_EMAIL && password.as_str() == EXISTING_PASSWORD {
            Ok(UserId::from_i64(EXISTING_ID))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn exists(&self, id: UserId) -> AuthResult<bool> {
        Ok(id.as_i64() == EXISTING_ID)
    }

    async fn get(&self, id: UserId) -> AuthResult<User> {
        if id.as_i64() == EXISTING_ID {
            Ok(Self::existing_user())
        } else {
            Err(AuthError::NoRecord)
        }
    }

    async fn update_password(
        &self,
        id: UserId,
        current: ClearTextPassword,
        _new: ClearTextPassword,
    ) -> AuthResult<()> {
        if id.as_i64() != EXISTING_ID {
            return Err(AuthError::NoRecord);
        }
        if current.as_str() != EXISTING_PASSWORD {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(())
    }
}
