//! Read-only admin overview.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::catalog::Product;
use crate::filters;
use crate::routes::dashboard::OrderView;
use crate::routes::layout::Layout;
use crate::state::AppState;

/// Row in the product table.
#[derive(Clone)]
pub struct AdminProductRow {
    pub id: String,
    pub name: String,
    pub image: String,
    pub category: String,
    pub price: String,
    pub member_price: String,
    pub stock: u32,
    pub sold_out: bool,
}

impl From<&Product> for AdminProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            image: product.image.clone(),
            category: product.category.to_string(),
            price: product.price.display(),
            member_price: product.member_price.display(),
            stock: product.stock,
            sold_out: product.is_sold_out(),
        }
    }
}

/// Admin page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub layout: Layout,
    pub revenue: String,
    pub total_orders: u32,
    pub total_products: usize,
    pub total_customers: u32,
    pub products: Vec<AdminProductRow>,
    pub orders: Vec<OrderView>,
}

/// Display store stats with the product and order tables.
#[instrument(skip(state, layout))]
pub async fn index(State(state): State<AppState>, layout: Layout) -> impl IntoResponse {
    let catalog = state.catalog();
    let stats = catalog.stats();

    AdminTemplate {
        layout,
        revenue: stats.revenue.display(),
        total_orders: stats.orders,
        total_products: catalog.products().len(),
        total_customers: stats.customers,
        products: catalog.products().iter().map(AdminProductRow::from).collect(),
        orders: catalog.orders().iter().map(OrderView::from).collect(),
    }
}
