//! PostgreSQL Credential Store

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::{ClearTextPassword, HashedPassword};
use sqlx::PgPool;

use crate::domain::repository::UserStore;
use crate::domain::user::User;
use crate::domain::value_object::{Email, UserName};
use crate::error::{AuthError, AuthResult};

/// Name of the unique index guarding email collisions (see migrations)
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    async fn insert(
        &self,
        name: &UserName,
        email: &Email,
        password: ClearTextPassword,
    ) -> AuthResult<UserId> {
        let hash = hash_blocking(password).await?;

        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, email, password_hash, created_at)
            VALUES ($1, $2, $3, now())
            RETURNING id
            "#,
        )
        .bind(name.as_str())
        .bind(email.as_str())
        .bind(hash.as_phc_string())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(id) => {
                tracing::info!(user_id = id, "User signed up");
                Ok(UserId::from_i64(id))
            }
            Err(e) => Err(map_unique_violation(e)),
        }
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: ClearTextPassword,
    ) -> AuthResult<UserId> {
        let row = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, password_hash FROM users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        // Unknown email and wrong password must be indistinguishable
        let Some((id, hash)) = row else {
            return Err(AuthError::InvalidCredentials);
        };

        let hash =
            HashedPassword::from_phc_string(hash).map_err(|e| AuthError::Internal(e.to_string()))?;

        if !verify_blocking(hash, password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(UserId::from_i64(id))
    }

    async fn exists(&self, id: UserId) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(id.as_i64())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn get(&self, id: UserId) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                name,
                email,
                password_hash,
                created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()?.ok_or(AuthError::NoRecord)
    }

    async fn update_password(
        &self,
        id: UserId,
        current: ClearTextPassword,
        new: ClearTextPassword,
    ) -> AuthResult<()> {
        let hash = sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AuthError::NoRecord)?;

        let hash =
            HashedPassword::from_phc_string(hash).map_err(|e| AuthError::Internal(e.to_string()))?;

        // Re-verify before replacing; no blind overwrite
        if !verify_blocking(hash, current).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let new_hash = hash_blocking(new).await?;

        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id.as_i64())
            .bind(new_hash.as_phc_string())
            .execute(&self.pool)
            .await?;

        tracing::info!(user_id = %id, "User password updated");
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Hash on the blocking pool: Argon2id is deliberately slow and must not
/// stall the async executor (and holds no lock while it runs).
async fn hash_blocking(password: ClearTextPassword) -> AuthResult<HashedPassword> {
    tokio::task::spawn_blocking(move || password.hash())
        .await
        .map_err(|e| AuthError::Internal(format!("Hashing task failed: {e}")))?
        .map_err(AuthError::from)
}

async fn verify_blocking(hash: HashedPassword, password: ClearTextPassword) -> AuthResult<bool> {
    tokio::task::spawn_blocking(move || hash.verify(&password))
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {e}")))
}

/// Email uniqueness violations surface specifically as `DuplicateEmail`
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
        {
            return AuthError::DuplicateEmail;
        }
    }
    err.into()
}

// ============================================================================
// Row type for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid stored hash: {e}")))?;

        Ok(User {
            id: UserId::from_i64(self.id),
            name: UserName::from_db(self.name),
            email: Email::from_db(self.email),
            password_hash,
            created_at: self.created_at,
        })
    }
}
