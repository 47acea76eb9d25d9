//! Auth Router
//!
//! `/user/*` routes. Logout and password change sit behind the route guard;
//! signup and login are public. The session and CSRF stages are applied
//! app-wide by the binary, not here.

use axum::Router;
use axum::routing::{get, post};

use crate::domain::repository::UserStore;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the auth router for any credential store implementation
pub fn auth_router<S>(state: AuthAppState<S>) -> Router
where
    S: UserStore + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/user/logout", post(handlers::logout_submit))
        .route(
            "/user/password",
            get(handlers::password_form::<S>).post(handlers::password_submit::<S>),
        )
        .route_layer(axum::middleware::from_fn(require_auth));

    Router::new()
        .route(
            "/user/signup",
            get(handlers::signup_form).post(handlers::signup_submit::<S>),
        )
        .route(
            "/user/login",
            get(handlers::login_form).post(handlers::login_submit::<S>),
        )
        .merge(protected)
        .with_state(state)
}
