//! Application Router
//!
//! Generic over the three store implementations so the binary runs the
//! Postgres stack and the test suite runs the deterministic doubles through
//! the identical pipeline.

use std::time::Duration;

use auth::{AuthAppState, UserStore};
use axum::Router;
use kernel::error::app_error::AppError;
use session::{SessionManager, SessionRepository};
use snippets::{SnippetAppState, SnippetStore};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::security_headers;

/// Per-request deadline
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Assemble the full application
pub fn app_router<U, R, N>(
    user_store: U,
    session_manager: SessionManager<R>,
    snippet_store: N,
) -> Router
where
    U: UserStore + Clone + Send + Sync + 'static,
    R: SessionRepository + Send + Sync + 'static,
    N: SnippetStore + Clone + Send + Sync + 'static,
{
    let auth_state = AuthAppState::new(user_store);
    let snippet_state = SnippetAppState::new(snippet_store);

    // Layers run top-down in request order from the bottom of this chain:
    // the last `.layer()` call is outermost.
    Router::new()
        .merge(snippets::snippet_router(snippet_state))
        .merge(auth::auth_router(auth_state.clone()))
        .fallback(not_found)
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth::load_current_user::<U>,
        ))
        .layer(axum::middleware::from_fn(session::csrf::csrf_guard))
        .layer(axum::middleware::from_fn_with_state(
            session_manager,
            session::middleware::load_session::<R>,
        ))
        .layer(axum::middleware::from_fn(security_headers))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}

async fn not_found() -> AppError {
    AppError::not_found("The page you were looking for could not be found")
}
