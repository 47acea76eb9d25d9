//! CSRF Guard
//!
//! Pipeline stage between session load and the route handlers. Every
//! state-changing request (POST/PUT/PATCH/DELETE) must carry the anti-forgery
//! token bound to its session in the `csrf_token` form field; anything else
//! is rejected with 400 before handler logic runs. The response does not
//! reveal whether the token was missing, malformed, or wrong. Safe methods
//! pass through untouched — handlers embed the current token in rendered
//! forms via [`Session::csrf_token`](crate::handle::Session::csrf_token).

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;

use crate::handle::Session;

/// Form field carrying the anti-forgery token
pub const CSRF_FORM_FIELD: &str = "csrf_token";

/// Upper bound on buffered form bodies; our forms are tiny
const MAX_FORM_BYTES: usize = 64 * 1024;

/// Reject state-changing requests whose submitted token does not match the
/// session-bound secret.
pub async fn csrf_guard(req: Request<Body>, next: Next) -> Response {
    if !is_state_changing(req.method()) {
        return next.run(req).await;
    }

    let Some(session) = req.extensions().get::<Session>().cloned() else {
        return AppError::internal("Session middleware not installed").into_response();
    };

    // The body must be buffered to read the form field, then reattached so
    // the handler can still parse it.
    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, MAX_FORM_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return reject(parts.uri.path()),
    };

    let valid = submitted_token(&bytes)
        .map(|token| session.verify_csrf(&token))
        .unwrap_or(false);

    if !valid {
        return reject(parts.uri.path());
    }

    let req = Request::from_parts(parts, Body::from(bytes));
    next.run(req).await
}

fn is_state_changing(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn submitted_token(body: &[u8]) -> Option<String> {
    url::form_urlencoded::parse(body)
        .find(|(key, _)| key == CSRF_FORM_FIELD)
        .map(|(_, value)| value.into_owned())
}

fn reject(path: &str) -> Response {
    tracing::warn!(path = %path, "Rejected state-changing request without valid CSRF token");
    AppError::bad_request("Invalid anti-forgery token").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_changing_methods() {
        assert!(is_state_changing(&Method::POST));
        assert!(is_state_changing(&Method::PUT));
        assert!(is_state_changing(&Method::PATCH));
        assert!(is_state_changing(&Method::DELETE));
        assert!(!is_state_changing(&Method::GET));
        assert!(!is_state_changing(&Method::HEAD));
        assert!(!is_state_changing(&Method::OPTIONS));
    }

    #[test]
    fn test_submitted_token_parsing() {
        assert_eq!(
            submitted_token(b"name=Bob&csrf_token=abc123&email=x%40y.com"),
            Some("abc123".to_string())
        );
        assert_eq!(submitted_token(b"name=Bob&email=x%40y.com"), None);
        assert_eq!(submitted_token(b""), None);
        // percent-encoded values decode
        assert_eq!(
            submitted_token(b"csrf_token=a%2Bb"),
            Some("a+b".to_string())
        );
    }
}
