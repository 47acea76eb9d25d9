//! Error conversions - HTTP boundary integration
//!
//! Renders [`AppError`] as an HTML error page (feature `axum`). The page
//! carries only the status line: messages may be user-safe, but internal
//! detail (queries, backend errors) lives in `source` and is for logs only.

#[cfg(feature = "axum")]
use super::app_error::AppError;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;
        use axum::response::Html;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = format!(
            "<!doctype html><html lang='en'><head><title>{status}</title></head>\
             <body><h1>{code} {reason}</h1></body></html>",
            status = self.kind().as_str(),
            code = self.status_code(),
            reason = self.kind().as_str(),
        );

        (status, Html(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use crate::error::app_error::AppError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_into_response_status() {
        let res = AppError::not_found("missing").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = AppError::internal("boom").into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
