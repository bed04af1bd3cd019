//! Wishlist add/remove. Members only.
//!
//! The form carries the action the page offered, so submitting the same
//! form twice leaves the wishlist as the first submit left it.

use axum::{Form, extract::State, response::Redirect};
use febsin_core::ProductId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Wishlist;
use crate::models::session::{self, keys};
use crate::routes::notice::{redirect_error, redirect_success, safe_return};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishlistAction {
    #[default]
    Add,
    Remove,
}

#[derive(Debug, Deserialize)]
pub struct WishlistForm {
    pub product_id: String,
    #[serde(default)]
    pub action: WishlistAction,
    pub return_to: Option<String>,
}

/// Add a product to, or remove it from, the member's wishlist.
#[instrument(skip(state, session, user, form), fields(user_id = %user.id, action = ?form.action))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(form): Form<WishlistForm>,
) -> Result<Redirect> {
    let back = safe_return(form.return_to.as_deref(), "/shop");
    if state.catalog().product(&form.product_id).is_none() {
        return Ok(redirect_error(&back, "unknown_product"));
    }

    let id = ProductId::new(form.product_id);
    let mut wishlist: Wishlist = session::load(&session, keys::WISHLIST).await?;
    let code = match form.action {
        WishlistAction::Add => {
            wishlist.add(id);
            "wishlist_added"
        }
        WishlistAction::Remove => {
            wishlist.remove(&id);
            "wishlist_removed"
        }
    };
    session::store(&session, keys::WISHLIST, &wishlist).await?;

    Ok(redirect_success(&back, code))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_action_defaults_to_add() {
        let form: WishlistForm = serde_json::from_str(r#"{"product_id":"2"}"#).unwrap();
        assert_eq!(form.action, WishlistAction::Add);

        let form: WishlistForm =
            serde_json::from_str(r#"{"product_id":"2","action":"remove"}"#).unwrap();
        assert_eq!(form.action, WishlistAction::Remove);
    }
}
