//! Security headers middleware.
//!
//! Adds restrictive security headers to all responses. Product photos and
//! avatars come from two image hosts, and checkout submits to the shop's
//! own origin before redirecting to WhatsApp; everything else stays on
//! `'self'`.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

use super::CspNonce;

/// Hosts allowed in `img-src`.
const IMAGE_HOSTS: &str = "https://images.unsplash.com https://api.dicebear.com";

/// Build the CSP header value. Inline scripts need the per-request nonce.
#[must_use]
pub fn content_security_policy(nonce: Option<&str>) -> String {
    let script_src = nonce.map_or_else(
        || "script-src 'self'".to_string(),
        |n| format!("script-src 'self' 'nonce-{n}'"),
    );
    format!(
        "default-src 'none'; \
         {script_src}; \
         style-src 'self'; \
         font-src 'self'; \
         img-src 'self' data: {IMAGE_HOSTS}; \
         connect-src 'self'; \
         frame-src 'none'; \
         object-src 'none'; \
         base-uri 'self'; \
         form-action 'self' https://wa.me; \
         frame-ancestors 'none'"
    )
}

/// Add security headers to all responses.
///
/// - `X-Frame-Options: DENY`
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: same-origin` (login redirects read the local referer)
/// - `Content-Security-Policy` with the request nonce
/// - `Permissions-Policy` denying sensors, camera, payment and friends
/// - `Cache-Control: no-store` (pages show the visitor's cart)
/// - `Cross-Origin-Opener-Policy: same-origin`
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let nonce = request.extensions().get::<CspNonce>().cloned();
    let mut response = next.run(request).await;
    let nonce = nonce.or_else(|| response.extensions().get::<CspNonce>().cloned());

    let csp = content_security_policy(nonce.as_ref().map(CspNonce::value));
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("same-origin"));

    match HeaderValue::from_str(&csp) {
        Ok(value) => {
            headers.insert(CONTENT_SECURITY_POLICY, value);
        }
        Err(e) => tracing::error!("Invalid CSP header value: {e}"),
    }

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "accelerometer=(), \
             camera=(), \
             display-capture=(), \
             geolocation=(), \
             gyroscope=(), \
             magnetometer=(), \
             microphone=(), \
             payment=(), \
             usb=()",
        ),
    );

    headers.insert(
        HeaderName::from_static("cache-control"),
        HeaderValue::from_static("no-store, max-age=0"),
    );

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_allows_image_hosts_and_whatsapp() {
        let csp = content_security_policy(Some("abc123"));
        assert!(csp.contains("script-src 'self' 'nonce-abc123'"));
        assert!(csp.contains("https://images.unsplash.com"));
        assert!(csp.contains("https://api.dicebear.com"));
        assert!(csp.contains("form-action 'self' https://wa.me"));
    }

    #[test]
    fn test_csp_without_nonce() {
        let csp = content_security_policy(None);
        assert!(csp.contains("script-src 'self';"));
        assert!(!csp.contains("nonce-"));
    }
}
