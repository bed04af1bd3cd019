//! Febsin Storefront library.
//!
//! This crate provides the storefront as a library so the binary stays
//! thin and the router can be driven from integration tests.
//!
//! # Architecture
//!
//! - Axum web framework, plain HTML forms with redirect-after-post
//! - Askama templates for server-side rendering
//! - Built-in catalog fixtures, markdown content loaded at startup
//! - Per-visitor state (member, cart, wishlist, theme) in tower-sessions
//! - Checkout hands the order to WhatsApp; no payment is taken

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, body::Body, http::Request, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    create_session_layer, csp_nonce_middleware, request_id_middleware,
    security_headers_middleware,
};
use crate::state::AppState;

/// Build the full application: routes, static files, sessions and the
/// middleware stack.
pub fn build_router(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(session_layer)
        .with_state(state)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(csp_nonce_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
