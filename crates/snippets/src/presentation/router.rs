//! Snippet Router
//!
//! Reading is public; creation sits behind the route guard, so anonymous
//! visitors are redirected to login with the requested path remembered.

use axum::Router;
use axum::routing::get;

use crate::domain::repository::SnippetStore;
use crate::presentation::handlers::{self, SnippetAppState};

/// Create the snippet router for any snippet store implementation
pub fn snippet_router<S>(state: SnippetAppState<S>) -> Router
where
    S: SnippetStore + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route(
            "/snippet/create",
            get(handlers::create_form).post(handlers::create_submit::<S>),
        )
        .route_layer(axum::middleware::from_fn(auth::require_auth));

    Router::new()
        .route("/", get(handlers::home::<S>))
        .route("/snippet/view/{id}", get(handlers::view::<S>))
        .merge(protected)
        .with_state(state)
}
