//! Credential Store Contract
//!
//! The polymorphism point of the auth core: exactly five operations, with
//! two interchangeable implementations (Postgres and a deterministic
//! in-memory double). Plaintext passwords cross this boundary inside
//! [`ClearTextPassword`] and nothing below it ever stores or logs them.

use kernel::id::UserId;
use platform::password::ClearTextPassword;

use crate::domain::user::User;
use crate::domain::value_object::{Email, UserName};
use crate::error::AuthResult;

/// Credential store trait
#[trait_variant::make(UserStore: Send)]
pub trait LocalUserStore {
    /// Create a user. The password is salted and hashed (Argon2id, fixed
    /// cost) before persistence; a colliding email yields
    /// [`AuthError::DuplicateEmail`](crate::error::AuthError::DuplicateEmail),
    /// distinguishable from every other store error.
    async fn insert(
        &self,
        name: &UserName,
        email: &Email,
        password: ClearTextPassword,
    ) -> AuthResult<UserId>;

    /// Verify credentials and return the user id. Unknown email and wrong
    /// password both yield
    /// [`AuthError::InvalidCredentials`](crate::error::AuthError::InvalidCredentials).
    async fn authenticate(&self, email: &Email, password: ClearTextPassword)
    -> AuthResult<UserId>;

    /// Check whether a user id is live
    async fn exists(&self, id: UserId) -> AuthResult<bool>;

    /// Fetch a user by id;
    /// [`AuthError::NoRecord`](crate::error::AuthError::NoRecord) when absent
    async fn get(&self, id: UserId) -> AuthResult<User>;

    /// Replace the stored hash after re-verifying the current password.
    /// There is no blind-overwrite path.
    async fn update_password(
        &self,
        id: UserId,
        current: ClearTextPassword,
        new: ClearTextPassword,
    ) -> AuthResult<()>;
}
