//! Request ID middleware for request tracing and correlation.
//!
//! Uses the `x-request-id` sent by an upstream proxy when present, otherwise
//! generates a UUID v4. The ID is recorded on the current span, tagged on
//! the Sentry scope and echoed back in the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID accepted as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Pick the request ID: a sane upstream value or a fresh UUID.
fn resolve_request_id(upstream: Option<&str>) -> String {
    upstream
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok()),
    );

    Span::current().record("request_id", &request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_id_is_kept() {
        assert_eq!(resolve_request_id(Some("cf-123")), "cf-123");
    }

    #[test]
    fn test_missing_or_oversized_id_is_replaced() {
        let generated = resolve_request_id(None);
        assert!(Uuid::parse_str(&generated).is_ok());

        let long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        assert_ne!(resolve_request_id(Some(&long)), long);
        assert_ne!(resolve_request_id(Some("  ")), "  ");
    }
}
