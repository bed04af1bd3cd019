//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//!
//! # Shop
//! GET  /shop                   - Product listing with filters
//! GET  /product/{id}           - Product detail (?sort= for reviews)
//! POST /product/{id}/reviews   - Write a review (login required)
//! POST /reviews/{id}/helpful   - Toggle a helpful vote
//! GET  /search/suggest         - Header search suggestions (fragment)
//!
//! # Cart & checkout
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add product in a size
//! POST /cart/quick-add         - Add product in its first size
//! POST /cart/update            - Set quantity (0 removes)
//! POST /cart/remove            - Remove line
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /wishlist/toggle        - Add or remove a wishlist item (login required)
//! GET  /checkout               - Checkout form
//! POST /checkout               - Hand the order off to WhatsApp
//!
//! # Auth (POSTs rate limited)
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Member & admin
//! GET  /dashboard              - Member dashboard (login required)
//! GET  /admin                  - Read-only store overview
//!
//! # Content
//! GET  /about                  - About page
//! GET  /blog                   - Blog index
//! GET  /blog/{slug}            - Blog post
//! GET  /lookbook               - Lookbook gallery
//! POST /lookbook/{id}/like     - Toggle like (login required)
//! GET  /contact                - Contact page
//! POST /contact                - Contact form
//! POST /newsletter             - Footer newsletter signup
//! POST /theme/toggle           - Flip light/dark theme
//!
//! *                            - Anything else redirects home
//! ```

pub mod admin;
pub mod auth;
pub mod blog;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod dashboard;
pub mod home;
pub mod layout;
pub mod newsletter;
pub mod notice;
pub mod pages;
pub mod search;
pub mod shop;
pub mod theme;
pub mod wishlist;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Forms and queries that only carry the page to go back to.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnToForm {
    pub return_to: Option<String>,
}

/// Create the auth routes router. Only the form posts are rate limited.
pub fn auth_routes() -> Router<AppState> {
    let limiter = auth_rate_limiter();

    Router::new()
        .route(
            "/login",
            get(auth::login_page).merge(post(auth::login).layer(limiter.clone())),
        )
        .route(
            "/register",
            get(auth::register_page).merge(post(auth::register).layer(limiter)),
        )
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/quick-add", post(cart::quick_add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the shop and product routes.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/shop", get(shop::index))
        .route("/product/{id}", get(shop::show))
        .route("/product/{id}/reviews", post(shop::submit_review))
        .route("/reviews/{id}/helpful", post(shop::toggle_helpful))
        .route("/search/suggest", get(search::suggest))
        .route("/wishlist/toggle", post(wishlist::toggle))
}

/// Create the content page routes.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/about", get(pages::about))
        .route("/blog", get(blog::index))
        .route("/blog/{slug}", get(blog::show))
        .route("/lookbook", get(pages::lookbook))
        .route("/lookbook/{id}/like", post(pages::toggle_like))
        .route("/contact", get(contact::show).post(contact::submit))
        .route("/newsletter", post(newsletter::subscribe))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(shop_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .nest("/auth", auth_routes())
        .route("/dashboard", get(dashboard::show))
        .route("/admin", get(admin::index))
        .merge(content_routes())
        .route("/theme/toggle", post(theme::toggle))
        .fallback(|| async { Redirect::to("/") })
}
