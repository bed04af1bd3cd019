//! Domain models for storefront.
//!
//! Visitor state (cart, wishlist, current user) is serialized into the
//! session; catalog data lives in [`crate::catalog`].

pub mod cart;
pub mod session;

pub use cart::{Cart, CartError, CartLine, OrderSummary, Wishlist};
pub use session::{CurrentUser, keys as session_keys};
