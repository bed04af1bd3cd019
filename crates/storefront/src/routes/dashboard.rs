//! Member dashboard.
//!
//! ```text
//! GET /dashboard?tab=profile|orders|wishlist|points
//! ```

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::Order;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::session::{self, keys};
use crate::models::{CurrentUser, Wishlist};
use crate::routes::layout::{Layout, ProductCardView};
use crate::state::AppState;

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Profile,
    Orders,
    Wishlist,
    Points,
}

impl DashboardTab {
    pub const ALL: [Self; 4] = [Self::Profile, Self::Orders, Self::Wishlist, Self::Points];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Orders => "orders",
            Self::Wishlist => "wishlist",
            Self::Points => "points",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Profile => "Profil",
            Self::Orders => "Pesanan",
            Self::Wishlist => "Wishlist",
            Self::Points => "Poin",
        }
    }

    /// Parse a `?tab=` value; anything unknown shows the profile.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        value
            .and_then(|v| Self::ALL.into_iter().find(|t| t.as_str() == v))
            .unwrap_or_default()
    }
}

/// Tab link.
#[derive(Clone)]
pub struct TabView {
    pub value: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Order line in the history.
#[derive(Clone)]
pub struct OrderItemView {
    pub product_name: String,
    pub quantity: u32,
    pub size: String,
    pub price: String,
}

/// Order card in the history.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub date: String,
    pub status: &'static str,
    /// CSS modifier for the status badge.
    pub badge: &'static str,
    pub total: String,
    pub items: Vec<OrderItemView>,
    pub tracking: Option<String>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            date: filters::format_date(order.date),
            status: order.status.label(),
            badge: order.status.badge_variant(),
            total: order.total.display(),
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    product_name: item.product_name.clone(),
                    quantity: item.quantity,
                    size: item.size.clone(),
                    price: item.price.display(),
                })
                .collect(),
            tracking: order.tracking.clone(),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub user: CurrentUser,
    pub tab: &'static str,
    pub tabs: Vec<TabView>,
    pub orders: Vec<OrderView>,
    pub wishlist: Vec<ProductCardView>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
}

/// Display the dashboard for the logged-in member.
#[instrument(skip(state, session, user, layout), fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(query): Query<DashboardQuery>,
    layout: Layout,
) -> Result<impl IntoResponse> {
    let tab = DashboardTab::parse(query.tab.as_deref());
    let wishlist: Wishlist = session::load(&session, keys::WISHLIST).await?;
    let catalog = state.catalog();

    let saved = wishlist
        .ids()
        .iter()
        .filter_map(|id| catalog.product(id.as_str()));

    Ok(DashboardTemplate {
        tab: tab.as_str(),
        tabs: DashboardTab::ALL
            .iter()
            .map(|t| TabView {
                value: t.as_str(),
                label: t.label(),
                active: *t == tab,
            })
            .collect(),
        orders: catalog.orders().iter().map(OrderView::from).collect(),
        wishlist: ProductCardView::list(saved, true, &wishlist),
        user,
        layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_parse() {
        assert_eq!(DashboardTab::parse(Some("wishlist")), DashboardTab::Wishlist);
        assert_eq!(DashboardTab::parse(Some("points")), DashboardTab::Points);
        assert_eq!(DashboardTab::parse(Some("admin")), DashboardTab::Profile);
        assert_eq!(DashboardTab::parse(None), DashboardTab::Profile);
    }
}
