//! Integration tests for the Febsin storefront.
//!
//! The router is driven in-process through `tower::ServiceExt::oneshot`, so
//! no server or network is needed:
//!
//! ```bash
//! cargo test -p febsin-integration-tests
//! ```
//!
//! [`TestApp`] keeps the session cookie between requests the way a browser
//! would, which is enough to exercise the cart, login and checkout flows.

use std::path::PathBuf;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use tower::ServiceExt;

use febsin_storefront::build_router;
use febsin_storefront::config::StorefrontConfig;
use febsin_storefront::state::AppState;

/// Responses larger than this are a bug in a test, not a page.
const MAX_BODY: usize = 4 * 1024 * 1024;

/// The storefront's bundled markdown content.
#[must_use]
pub fn content_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/content")
}

/// A storefront router plus the visitor's session cookie.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

/// What a test looks at in a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    /// Fresh storefront with fixture data and the bundled content.
    ///
    /// # Panics
    ///
    /// Panics if the content directory cannot be loaded.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let config = StorefrontConfig::for_tests(content_dir());
        let state = AppState::new(config).expect("content should load");
        Self {
            router: build_router(state),
            cookie: None,
        }
    }

    /// `GET path`.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.request("GET", path).body(Body::empty());
        self.send(request).await
    }

    /// `POST path` with a urlencoded form.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body));
        self.send(request).await
    }

    /// Log in as the demo member.
    pub async fn login(&mut self) -> TestResponse {
        self.post_form(
            "/auth/login",
            &[("email", "member@febsin.id"), ("password", "rahasia123")],
        )
        .await
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            // The auth rate limiter keys on the client IP
            .header("x-forwarded-for", "203.0.113.7");
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    #[allow(clippy::expect_used)]
    async fn send(
        &mut self,
        request: Result<Request<Body>, axum::http::Error>,
    ) -> TestResponse {
        let request = request.expect("request should build");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), MAX_BODY)
            .await
            .expect("body should read");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
