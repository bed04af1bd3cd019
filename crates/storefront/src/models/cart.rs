//! Cart and wishlist state kept in the visitor session.

use febsin_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::config::ShippingPolicy;

/// Reasons a product cannot be put in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Pilih ukuran terlebih dahulu")]
    SizeRequired,
    #[error("Ukuran tidak tersedia")]
    InvalidSize,
    #[error("Produk habis terjual")]
    SoldOut,
    #[error("Produk tidak ditemukan")]
    UnknownProduct,
}

impl CartError {
    /// Notice code used in redirects.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SizeRequired => "size_required",
            Self::InvalidSize => "invalid_size",
            Self::SoldOut => "sold_out",
            Self::UnknownProduct => "unknown_product",
        }
    }
}

/// A product in a given size and quantity.
///
/// Name, image and both prices are snapshotted when the line is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub price: Price,
    pub member_price: Price,
    pub size: String,
    pub quantity: u32,
    /// Stock at the time of adding; merged quantities never exceed it.
    pub stock: u32,
}

impl CartLine {
    /// Build a line for `product`, checking the size and clamping the
    /// quantity to `1..=stock`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] when no size is chosen, the size is not offered
    /// or the product is sold out.
    pub fn for_product(product: &Product, size: &str, quantity: u32) -> Result<Self, CartError> {
        let size = size.trim();
        if size.is_empty() {
            return Err(CartError::SizeRequired);
        }
        if !product.has_size(size) {
            return Err(CartError::InvalidSize);
        }
        if product.is_sold_out() {
            return Err(CartError::SoldOut);
        }

        Ok(Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            price: product.price,
            member_price: product.member_price,
            size: size.to_string(),
            quantity: quantity.clamp(1, product.stock),
            stock: product.stock,
        })
    }

    /// Unit price for the visitor.
    #[must_use]
    pub fn unit_price(&self, member: bool) -> Price {
        if member && self.member_price < self.price {
            self.member_price
        } else {
            self.price
        }
    }

    #[must_use]
    pub fn line_total(&self, member: bool) -> Price {
        self.unit_price(member).times(self.quantity)
    }

    fn is(&self, product_id: &ProductId, size: &str) -> bool {
        &self.product_id == product_id && self.size == size
    }
}

/// Totals shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub item_count: u32,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
    /// How much more to spend for free shipping, if anything.
    pub free_shipping_remaining: Option<Price>,
    /// Savings from member prices, zero for guests.
    pub member_savings: Price,
}

impl OrderSummary {
    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// The shopping cart. At most one line per product and size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Add a line, merging quantities with an existing line for the same
    /// product and size. The merged quantity is capped at the line's stock.
    pub fn add(&mut self, line: CartLine) {
        match self
            .lines
            .iter_mut()
            .find(|l| l.is(&line.product_id, &line.size))
        {
            Some(existing) => {
                existing.stock = line.stock;
                existing.quantity = existing
                    .quantity
                    .saturating_add(line.quantity)
                    .min(line.stock);
            }
            None => self.lines.push(line),
        }
    }

    /// Drop the line for a product and size. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId, size: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| !l.is(product_id, size));
        self.lines.len() != before
    }

    /// Set a line's quantity; zero removes it.
    pub fn update_quantity(&mut self, product_id: &ProductId, size: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id, size);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.is(product_id, size)) {
            line.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Price the cart for a guest or a member.
    #[must_use]
    pub fn summary(&self, member: bool, shipping: &ShippingPolicy) -> OrderSummary {
        let subtotal: Price = self.lines.iter().map(|l| l.line_total(member)).sum();
        let regular: Price = self.lines.iter().map(|l| l.line_total(false)).sum();
        let shipping_cost = shipping.cost_for(subtotal);
        let free_shipping_remaining = (!shipping_cost.is_zero())
            .then(|| shipping.free_threshold.saturating_sub(subtotal));

        OrderSummary {
            item_count: self.item_count(),
            subtotal,
            shipping: shipping_cost,
            total: subtotal + shipping_cost,
            free_shipping_remaining,
            member_savings: regular.saturating_sub(subtotal),
        }
    }
}

/// Saved products, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    /// Add a product; adding twice is a no-op.
    pub fn add(&mut self, id: ProductId) {
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: &ProductId) {
        self.ids.retain(|i| i != id);
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn line(catalog: &Catalog, id: &str, size: &str, quantity: u32) -> CartLine {
        CartLine::for_product(catalog.product(id).unwrap(), size, quantity).unwrap()
    }

    #[test]
    fn test_add_same_product_and_size_merges() {
        let catalog = Catalog::fixtures();
        let mut cart = Cart::default();
        cart.add(line(&catalog, "1", "L", 1));
        cart.add(line(&catalog, "1", "L", 2));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);

        cart.add(line(&catalog, "1", "M", 1));
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let catalog = Catalog::fixtures();
        let mut cart = Cart::default();
        cart.add(line(&catalog, "2", "XL", 2));
        let id = ProductId::new("2");

        cart.update_quantity(&id, "XL", 5);
        assert_eq!(cart.item_count(), 5);

        cart.update_quantity(&id, "XL", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_only_matching_size() {
        let catalog = Catalog::fixtures();
        let mut cart = Cart::default();
        cart.add(line(&catalog, "1", "L", 1));
        cart.add(line(&catalog, "1", "S", 1));

        assert!(cart.remove(&ProductId::new("1"), "L"));
        assert!(!cart.remove(&ProductId::new("1"), "L"));
        assert_eq!(cart.lines()[0].size, "S");
    }

    #[test]
    fn test_for_product_validation() {
        let catalog = Catalog::fixtures();
        let tee = catalog.product("1").unwrap();
        assert_eq!(
            CartLine::for_product(tee, "", 1),
            Err(CartError::SizeRequired)
        );
        assert_eq!(
            CartLine::for_product(tee, "XXXL", 1),
            Err(CartError::InvalidSize)
        );

        let clamped = CartLine::for_product(tee, "M", 500).unwrap();
        assert_eq!(clamped.quantity, 50);
        let at_least_one = CartLine::for_product(tee, "M", 0).unwrap();
        assert_eq!(at_least_one.quantity, 1);

        let mut sold_out = tee.clone();
        sold_out.stock = 0;
        assert_eq!(
            CartLine::for_product(&sold_out, "M", 1),
            Err(CartError::SoldOut)
        );
    }

    #[test]
    fn test_summary_guest_pays_shipping_below_threshold() {
        let catalog = Catalog::fixtures();
        let mut cart = Cart::default();
        cart.add(line(&catalog, "1", "L", 1));
        cart.add(line(&catalog, "4", "One Size", 1));

        let summary = cart.summary(false, &ShippingPolicy::default());
        assert_eq!(summary.subtotal, Price::idr(328_000));
        assert_eq!(summary.shipping, Price::idr(25_000));
        assert_eq!(summary.total, Price::idr(353_000));
        assert_eq!(summary.free_shipping_remaining, Some(Price::idr(172_000)));
        assert!(summary.member_savings.is_zero());
    }

    #[test]
    fn test_summary_member_prices_and_free_shipping() {
        let catalog = Catalog::fixtures();
        let mut cart = Cart::default();
        cart.add(line(&catalog, "2", "L", 1));
        cart.add(line(&catalog, "1", "L", 1));

        let guest = cart.summary(false, &ShippingPolicy::default());
        assert_eq!(guest.subtotal, Price::idr(598_000));
        assert!(guest.is_free_shipping());
        assert_eq!(guest.free_shipping_remaining, None);

        let member = cart.summary(true, &ShippingPolicy::default());
        assert_eq!(member.subtotal, Price::idr(528_000));
        assert_eq!(member.total, Price::idr(528_000));
        assert_eq!(member.member_savings, Price::idr(70_000));
    }

    #[test]
    fn test_wishlist_add_and_remove_are_idempotent() {
        let mut wishlist = Wishlist::default();
        wishlist.add(ProductId::new("3"));
        wishlist.add(ProductId::new("3"));
        assert_eq!(wishlist.len(), 1);

        wishlist.remove(&ProductId::new("3"));
        wishlist.remove(&ProductId::new("3"));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_add_merge_capped_at_stock() {
        let catalog = Catalog::fixtures();
        let stock = catalog.product("2").unwrap().stock;
        let mut cart = Cart::default();
        cart.add(line(&catalog, "2", "L", stock));
        cart.add(line(&catalog, "2", "L", 5));
        assert_eq!(cart.lines()[0].quantity, stock);
    }
}
