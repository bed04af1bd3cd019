//! Page chrome shared by every full-page template.
//!
//! The header shows the cart badge, the wishlist link and the member name,
//! the `<html>` element carries the theme class, and a notice from the
//! previous redirect is shown above the content. [`Layout`] gathers all of
//! that from the request once so handlers only build their own view.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use febsin_core::Theme;
use tower_sessions::Session;

use crate::catalog::Product;
use crate::error::AppError;
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::session::{self, keys};
use crate::models::{Cart, CurrentUser, Wishlist};
use crate::routes::notice::Notice;
use crate::state::AppState;

/// Header, footer and notice data for the base template.
#[derive(Debug, Clone)]
pub struct Layout {
    pub nonce: String,
    pub theme: Theme,
    pub cart_count: u32,
    pub wishlist_count: usize,
    pub user: Option<CurrentUser>,
    pub notice: Option<Notice>,
    /// Path and query of this request, posted back as `return_to`.
    pub current_path: String,
    /// WhatsApp customer service number.
    pub contact_number: String,
}

impl Layout {
    /// Whether the visitor sees member prices.
    #[must_use]
    pub const fn is_member(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        matches!(self.theme, Theme::Dark)
    }

    /// Whether the nav link for `path` should be highlighted.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        let current = self
            .current_path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        if path == "/" {
            current == "/"
        } else {
            current == path || current.starts_with(&format!("{path}/"))
        }
    }

    /// Replace the notice, e.g. when re-rendering a form with an error.
    #[must_use]
    pub fn with_notice(mut self, notice: Option<Notice>) -> Self {
        if notice.is_some() {
            self.notice = notice;
        }
        self
    }
}

/// Session attached by `SessionManagerLayer`.
pub(crate) fn session_from_parts(parts: &Parts) -> Result<Session, AppError> {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Internal("session layer is not installed".to_string()))
}

impl FromRequestParts<AppState> for Layout {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let nonce = parts
            .extensions
            .get::<CspNonce>()
            .map(|n| n.value().to_string())
            .unwrap_or_default();

        let session = session_from_parts(parts)?;
        let user: Option<CurrentUser> = session.get(keys::CURRENT_USER).await?;
        let cart: Cart = session::load(&session, keys::CART).await?;
        let wishlist: Wishlist = session::load(&session, keys::WISHLIST).await?;
        let theme: Theme = session::load(&session, keys::THEME).await?;

        let current_path = parts
            .uri
            .path_and_query()
            .map_or_else(|| "/".to_string(), |pq| pq.as_str().to_string());

        Ok(Self {
            nonce,
            theme,
            cart_count: cart.item_count(),
            wishlist_count: wishlist.len(),
            user,
            notice: Notice::from_query(parts.uri.query()),
            current_path,
            contact_number: state.config().whatsapp.contact_number.clone(),
        })
    }
}

/// Product tile used on the home, shop, product and dashboard pages.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image: String,
    /// Price the visitor pays.
    pub price: String,
    /// Regular price, shown struck through when a member price applies.
    pub regular_price: Option<String>,
    pub featured: bool,
    /// "Stok tinggal N" when stock is low but not zero.
    pub low_stock: Option<String>,
    pub sold_out: bool,
    pub in_wishlist: bool,
}

/// Stock below this shows a "Stok tinggal" badge.
const LOW_STOCK_THRESHOLD: u32 = 10;

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, member: bool, wishlist: &Wishlist) -> Self {
        let price = product.price_for(member);
        let regular_price = (price < product.price).then(|| product.price.display());
        let low_stock = (product.stock > 0 && product.stock < LOW_STOCK_THRESHOLD)
            .then(|| format!("Stok tinggal {}", product.stock));

        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.to_string(),
            image: product.image.clone(),
            price: price.display(),
            regular_price,
            featured: product.featured,
            low_stock,
            sold_out: product.is_sold_out(),
            in_wishlist: wishlist.contains(&product.id),
        }
    }

    /// Cards for a list of products.
    #[must_use]
    pub fn list<'a>(
        products: impl IntoIterator<Item = &'a Product>,
        member: bool,
        wishlist: &Wishlist,
    ) -> Vec<Self> {
        products
            .into_iter()
            .map(|p| Self::new(p, member, wishlist))
            .collect()
    }
}

/// "Not found" page with a way back.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
    pub title: String,
    pub back_href: String,
    pub back_label: String,
}

impl NotFoundTemplate {
    /// Render with a 404 status.
    #[must_use]
    pub fn respond(layout: Layout, title: &str, back_href: &str, back_label: &str) -> Response {
        (
            StatusCode::NOT_FOUND,
            Self {
                layout,
                title: title.to_string(),
                back_href: back_href.to_string(),
                back_label: back_label.to_string(),
            },
        )
            .into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn layout(path: &str) -> Layout {
        Layout {
            nonce: String::new(),
            theme: Theme::Light,
            cart_count: 0,
            wishlist_count: 0,
            user: None,
            notice: None,
            current_path: path.to_string(),
            contact_number: String::new(),
        }
    }

    #[test]
    fn test_is_active_matches_section() {
        let layout = layout("/blog/febsin-sustainability?x=1");
        assert!(layout.is_active("/blog"));
        assert!(!layout.is_active("/"));
        assert!(!layout.is_active("/shop"));
        assert!(self::layout("/").is_active("/"));
    }

    #[test]
    fn test_product_card_member_price() {
        let catalog = Catalog::fixtures();
        let product = catalog.products().first().unwrap();
        let wishlist = Wishlist::default();

        let guest = ProductCardView::new(product, false, &wishlist);
        assert_eq!(guest.price, product.price.display());
        assert_eq!(guest.regular_price, None);

        let member = ProductCardView::new(product, true, &wishlist);
        assert_eq!(member.price, product.member_price.display());
        assert_eq!(member.regular_price, Some(product.price.display()));
    }
}
