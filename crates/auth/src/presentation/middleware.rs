//! Auth Middleware
//!
//! Two pipeline stages:
//! - [`load_current_user`] hydrates the authentication state from the
//!   session into the request extensions
//! - [`require_auth`] guards protected routes, remembering the requested
//!   path and redirecting anonymous visitors to the login page

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::{Request, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use kernel::error::app_error::AppError;
use kernel::id::UserId;
use session::{PREVIOUS_URL_KEY, Session};

use crate::domain::repository::UserStore;
use crate::presentation::handlers::AuthAppState;

/// Session key holding the signed-in user's id. Its presence *is* the
/// authentication flag; there is no separate boolean that could go stale.
pub const AUTHENTICATED_USER_ID_KEY: &str = "authenticatedUserID";

/// Authentication state for the current request
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentUser {
    pub is_authenticated: bool,
    /// Set only when `is_authenticated` holds
    pub user_id: Option<UserId>,
}

/// Populate [`CurrentUser`] from the session.
///
/// A session id is only trusted after re-checking the user still exists:
/// an account deleted mid-session drops back to anonymous on its very next
/// request. This costs one lookup per authenticated request and is a
/// deliberate trade.
pub async fn load_current_user<S>(
    State(state): State<AuthAppState<S>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    S: UserStore + Clone + Send + Sync + 'static,
{
    let session_user_id = req
        .extensions()
        .get::<Session>()
        .and_then(|session| session.get_i64(AUTHENTICATED_USER_ID_KEY));

    let current_user = match session_user_id {
        Some(raw_id) => {
            let user_id = UserId::from_i64(raw_id);
            match state.store.exists(user_id).await {
                Ok(true) => CurrentUser {
                    is_authenticated: true,
                    user_id: Some(user_id),
                },
                Ok(false) => CurrentUser::default(),
                Err(e) => {
                    // Fail to anonymous, never to authenticated
                    tracing::error!(error = %e, "Failed to re-validate session user");
                    CurrentUser::default()
                }
            }
        }
        None => CurrentUser::default(),
    };

    req.extensions_mut().insert(current_user);
    next.run(req).await
}

/// Guard for protected routes: anonymous requests are redirected to the
/// login page, and the requested path is remembered for the post-login
/// redirect.
pub async fn require_auth(req: Request<Body>, next: Next) -> Response {
    let authenticated = req
        .extensions()
        .get::<CurrentUser>()
        .map(|user| user.is_authenticated)
        .unwrap_or(false);

    if authenticated {
        return next.run(req).await;
    }

    if let Some(session) = req.extensions().get::<Session>() {
        session.put(PREVIOUS_URL_KEY, req.uri().path());
    }

    Redirect::to("/user/login").into_response()
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absent extension means the hydration stage did not run; treat the
        // request as anonymous rather than failing the page.
        Ok(parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .unwrap_or_default())
    }
}
