//! Febsin Core - Shared types library.
//!
//! This crate provides common types used across the Febsin components:
//! - `storefront` - Public-facing shop, cart, checkout hand-off and content pages
//! - `integration-tests` - End-to-end router tests
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no sessions,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, rupiah prices, emails and
//!   the catalog taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
