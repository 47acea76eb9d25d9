//! Auth (Authentication) Module
//!
//! Structure:
//! - `domain/` - User entity, value objects, the credential store contract
//! - `infra/` - Postgres store and the deterministic in-memory test double
//! - `presentation/` - HTTP handlers, forms, pages, middleware, router
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant), always on
//!   a blocking worker
//! - Unknown email and wrong password are indistinguishable to the caller
//! - Session token rotation on login and logout
//! - Duplicate emails surface as a field-level form error, never a 500
//! - Every authenticated request re-validates that the user still exists

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::repository::{LocalUserStore, UserStore};
pub use error::{AuthError, AuthResult};
pub use infra::mock::MockUserStore;
pub use infra::postgres::PgUserStore;
pub use presentation::handlers::{AuthAppState, page_chrome};
pub use presentation::middleware::{
    AUTHENTICATED_USER_ID_KEY, CurrentUser, load_current_user, require_auth,
};
pub use presentation::router::auth_router;

pub mod models {
    pub use crate::domain::user::User;
    pub use crate::domain::value_object::*;
}
