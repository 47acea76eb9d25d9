//! Session Middleware
//!
//! Pipeline stage that loads the session before the handler runs and saves
//! it afterwards, emitting or refreshing the session cookie on the response.
//! Handlers receive the [`Session`] through an extractor.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::{Request, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use kernel::error::app_error::AppError;

use crate::handle::Session;
use crate::manager::SessionManager;
use crate::store::SessionRepository;

/// Load the request's session into the extensions, run the rest of the
/// pipeline, then persist and set the cookie.
pub async fn load_session<R>(
    State(manager): State<SessionManager<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: SessionRepository + Send + Sync + 'static,
{
    let cookie = platform::cookie::extract_cookie(req.headers(), &manager.config().cookie.name);

    let session = manager.load(cookie.as_deref()).await;
    req.extensions_mut().insert(session.clone());

    let mut response = next.run(req).await;

    match manager.save(&session).await {
        Ok(Some(set_cookie)) => match platform::cookie::header_value(&set_cookie) {
            Some(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            None => tracing::error!("Session cookie value was not a valid header"),
        },
        Ok(None) => {}
        Err(e) => {
            // The handler already ran; losing one save is preferable to
            // failing the whole response, but it must be visible in logs.
            tracing::error!(error = %e, "Failed to persist session");
        }
    }

    response
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::internal("Session middleware not installed"))
    }
}
