//! Snippets (Content) Module
//!
//! The content model the authentication core fronts: create, view, and list
//! text snippets with a fixed expiry. Creation requires a signed-in
//! principal; reading is public.
//!
//! Structure mirrors the auth crate:
//! - `domain/` - Snippet entity and store contract
//! - `infra/` - Postgres store and deterministic in-memory double
//! - `presentation/` - HTTP handlers, forms, pages, router

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use domain::repository::{LocalSnippetStore, SnippetStore};
pub use error::{SnippetError, SnippetResult};
pub use infra::mock::MockSnippetStore;
pub use infra::postgres::PgSnippetStore;
pub use presentation::handlers::SnippetAppState;
pub use presentation::router::snippet_router;
