//! Cart route handlers.
//!
//! The cart lives in the session. Mutations are plain form posts that
//! redirect back with a notice, so the cart works without JavaScript.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use febsin_core::ProductId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::session::{self, keys};
use crate::models::{Cart, CartError, CartLine, OrderSummary};
use crate::routes::layout::Layout;
use crate::routes::notice::{redirect_error, redirect_success, safe_return};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: String,
    /// Regular unit price, shown struck through for members.
    pub regular_price: Option<String>,
    pub line_total: String,
}

impl CartLineView {
    fn new(line: &CartLine, member: bool) -> Self {
        let unit = line.unit_price(member);
        Self {
            product_id: line.product_id.to_string(),
            name: line.name.clone(),
            image: line.image.clone(),
            size: line.size.clone(),
            quantity: line.quantity,
            unit_price: unit.display(),
            regular_price: (unit < line.price).then(|| line.price.display()),
            line_total: line.line_total(member).display(),
        }
    }
}

/// Order totals as printed on the cart and checkout pages.
#[derive(Clone)]
pub struct SummaryView {
    pub item_count: u32,
    pub subtotal: String,
    pub free_shipping: bool,
    /// Flat fee when shipping is charged.
    pub shipping: String,
    pub total: String,
    /// "Belanja Rp X lagi" amount.
    pub free_shipping_remaining: Option<String>,
    pub member_savings: Option<String>,
}

impl From<&OrderSummary> for SummaryView {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            item_count: summary.item_count,
            subtotal: summary.subtotal.display(),
            free_shipping: summary.is_free_shipping(),
            shipping: summary.shipping.display(),
            total: summary.total.display(),
            free_shipping_remaining: summary.free_shipping_remaining.map(|p| p.display()),
            member_savings: (!summary.member_savings.is_zero())
                .then(|| summary.member_savings.display()),
        }
    }
}

/// Lines and totals for a cart.
pub fn cart_views(cart: &Cart, summary: &OrderSummary, member: bool) -> (Vec<CartLineView>, SummaryView) {
    (
        cart.lines()
            .iter()
            .map(|line| CartLineView::new(line, member))
            .collect(),
        SummaryView::from(summary),
    )
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    #[serde(default)]
    pub size: String,
    pub quantity: Option<u32>,
    pub return_to: Option<String>,
}

/// Quick add from a product card. Uses the first listed size.
#[derive(Debug, Deserialize)]
pub struct QuickAddForm {
    pub product_id: String,
    pub return_to: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub size: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
    pub size: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub lines: Vec<CartLineView>,
    pub summary: SummaryView,
}

/// Cart count badge fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(state, session, layout))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
) -> Result<impl IntoResponse> {
    let cart: Cart = session::load(&session, keys::CART).await?;
    let member = layout.is_member();
    let summary = cart.summary(member, &state.config().shipping);
    let (lines, summary) = cart_views(&cart, &summary, member);

    Ok(CartShowTemplate {
        layout,
        lines,
        summary,
    })
}

/// Put a line into the session cart, or return the reason it was refused.
async fn add_line(
    state: &AppState,
    session: &Session,
    product_id: &str,
    size: Option<&str>,
    quantity: u32,
) -> Result<std::result::Result<(), CartError>> {
    let Some(product) = state.catalog().product(product_id) else {
        return Ok(Err(CartError::UnknownProduct));
    };
    let Some(size) = size.or_else(|| product.first_size()) else {
        return Ok(Err(CartError::SizeRequired));
    };
    let line = match CartLine::for_product(product, size, quantity) {
        Ok(line) => line,
        Err(e) => return Ok(Err(e)),
    };

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product_id), ("size", &line.size)]),
    );

    let mut cart: Cart = session::load(session, keys::CART).await?;
    cart.add(line);
    session::store(session, keys::CART, &cart).await?;
    Ok(Ok(()))
}

/// Where a refused add goes: unknown products back to the shop, the rest
/// back to the product page.
fn refused_target(product_id: &str, error: &CartError) -> String {
    match error {
        CartError::UnknownProduct => "/shop".to_string(),
        _ => format!("/product/{product_id}"),
    }
}

/// Add a product in the chosen size.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let size = form.size.trim();
    if size.is_empty() {
        let back = format!("/product/{}", form.product_id);
        return Ok(redirect_error(&back, CartError::SizeRequired.code()));
    }

    let quantity = form.quantity.unwrap_or(1);
    match add_line(&state, &session, &form.product_id, Some(size), quantity).await? {
        Ok(()) => {
            let back = safe_return(form.return_to.as_deref(), "/cart");
            Ok(redirect_success(&back, "cart_added"))
        }
        Err(e) => {
            tracing::debug!(product_id = %form.product_id, "Add to cart refused: {e}");
            Ok(redirect_error(&refused_target(&form.product_id, &e), e.code()))
        }
    }
}

/// Add one unit in the first size from a product card.
#[instrument(skip(state, session))]
pub async fn quick_add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<QuickAddForm>,
) -> Result<Redirect> {
    let back = safe_return(form.return_to.as_deref(), "/shop");
    match add_line(&state, &session, &form.product_id, None, 1).await? {
        Ok(()) => Ok(redirect_success(&back, "cart_added")),
        Err(CartError::SoldOut) => Ok(redirect_error(&back, CartError::SoldOut.code())),
        Err(e) => Ok(redirect_error(&refused_target(&form.product_id, &e), e.code())),
    }
}

/// Change a line's quantity. Zero removes the line; larger values are
/// capped at the product's stock.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let product_id = ProductId::new(form.product_id);
    let quantity = state
        .catalog()
        .product(product_id.as_str())
        .map_or(form.quantity, |p| form.quantity.min(p.stock));

    let mut cart: Cart = session::load(&session, keys::CART).await?;
    cart.update_quantity(&product_id, &form.size, quantity);
    session::store(&session, keys::CART, &cart).await?;

    let code = if quantity == 0 { "cart_removed" } else { "cart_updated" };
    Ok(redirect_success("/cart", code))
}

/// Remove a line.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let mut cart: Cart = session::load(&session, keys::CART).await?;
    if cart.remove(&ProductId::new(form.product_id), &form.size) {
        session::store(&session, keys::CART, &cart).await?;
    }
    Ok(redirect_success("/cart", "cart_removed"))
}

/// Cart count badge fragment.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let cart: Cart = session::load(&session, keys::CART).await?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refused_target() {
        assert_eq!(refused_target("7", &CartError::UnknownProduct), "/shop");
        assert_eq!(refused_target("7", &CartError::SoldOut), "/product/7");
        assert_eq!(refused_target("7", &CartError::InvalidSize), "/product/7");
    }
}
