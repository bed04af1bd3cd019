//! Checkout page and WhatsApp hand-off.
//!
//! ```text
//! GET  /checkout   - Shipping form and order summary
//! POST /checkout   - Validate, build the order message, redirect to wa.me
//! ```

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::Cart;
use crate::models::session::{self, keys};
use crate::routes::cart::{CartLineView, SummaryView, cart_views};
use crate::routes::layout::Layout;
use crate::routes::notice::{Notice, redirect_error};
use crate::services::checkout::{build_order_message, whatsapp_url};
use crate::services::{CheckoutError, CheckoutForm, ShippingMethod};
use crate::state::AppState;

/// Courier radio button.
#[derive(Clone)]
pub struct ShippingOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub layout: Layout,
    /// Values to put back into the inputs.
    pub form: CheckoutForm,
    pub shipping_options: Vec<ShippingOptionView>,
    /// "GRATIS" or the flat fee, shown next to every courier.
    pub shipping_fee: String,
    pub lines: Vec<CartLineView>,
    pub summary: SummaryView,
}

impl CheckoutTemplate {
    fn new(state: &AppState, layout: Layout, cart: &Cart, form: CheckoutForm) -> Self {
        let member = layout.is_member();
        let summary = cart.summary(member, &state.config().shipping);
        let (lines, summary) = cart_views(cart, &summary, member);

        Self {
            shipping_options: ShippingMethod::ALL
                .iter()
                .map(|m| ShippingOptionView {
                    value: m.as_str(),
                    label: m.label(),
                    checked: *m == form.shipping_method,
                })
                .collect(),
            shipping_fee: if summary.free_shipping {
                "GRATIS".to_string()
            } else {
                summary.shipping.clone()
            },
            layout,
            form,
            lines,
            summary,
        }
    }
}

/// Display the checkout form. An empty cart goes back to the cart page.
#[instrument(skip(state, session, layout))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
) -> Result<Response> {
    let cart: Cart = session::load(&session, keys::CART).await?;
    if cart.is_empty() {
        return Ok(redirect_error("/cart", CheckoutError::EmptyCart.code()).into_response());
    }

    // Members get their name and email filled in
    let form = layout
        .user
        .as_ref()
        .map(|user| CheckoutForm {
            name: user.name.clone(),
            email: user.email.to_string(),
            ..CheckoutForm::default()
        })
        .unwrap_or_default();

    Ok(CheckoutTemplate::new(&state, layout, &cart, form).into_response())
}

/// Validate the form and hand the order off to WhatsApp.
///
/// On success the cart is emptied and the visitor is redirected to the
/// `wa.me` link. Missing fields re-render the form with what was typed.
#[instrument(skip(state, session, layout, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart: Cart = session::load(&session, keys::CART).await?;
    if cart.is_empty() {
        return Ok(redirect_error("/cart", CheckoutError::EmptyCart.code()).into_response());
    }

    if let Err(e) = form.validate() {
        tracing::debug!("Checkout rejected: {e}");
        let layout = layout.with_notice(Notice::error(e.code()));
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            CheckoutTemplate::new(&state, layout, &cart, form),
        )
            .into_response());
    }

    let member = layout.is_member();
    let summary = cart.summary(member, &state.config().shipping);
    let message = build_order_message(&form, &cart, &summary, member);
    let url = whatsapp_url(&state.config().whatsapp.order_number, &message);

    add_breadcrumb(
        "checkout",
        "Order handed off to WhatsApp",
        Some(&[
            ("items", &summary.item_count.to_string()),
            ("total", &summary.total.to_string()),
            ("shipping_method", form.shipping_method.as_str()),
        ]),
    );
    tracing::info!(
        items = summary.item_count,
        total = %summary.total,
        member,
        "Checkout handed off to WhatsApp"
    );

    cart.clear();
    session::store(&session, keys::CART, &cart).await?;

    Ok(Redirect::to(&url).into_response())
}
