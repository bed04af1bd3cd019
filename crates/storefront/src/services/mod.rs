//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Mock member login and registration
//! - `checkout` - Order message and WhatsApp hand-off

pub mod auth;
pub mod checkout;

pub use auth::{AuthError, AuthService, Registration};
pub use checkout::{CheckoutError, CheckoutForm, ShippingMethod};
