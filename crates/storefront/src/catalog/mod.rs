//! In-memory product catalog.
//!
//! The shop has no backend of record: products, reviews, orders,
//! testimonials and lookbook images are compiled-in fixtures (see
//! [`fixtures`]). Everything here is read-only after startup and shared
//! between requests behind an `Arc`.

pub mod filter;
pub mod fixtures;
pub mod reviews;

use chrono::NaiveDate;
use febsin_core::{
    Category, Gender, LookbookImageId, OrderId, OrderStatus, Price, ProductId, ReviewId,
};
use serde::{Deserialize, Serialize};

pub use filter::ShopFilter;
pub use reviews::{NewReview, RatingSummary, ReviewError, ReviewSort};

/// Number of suggestions shown under the header search box.
pub const SEARCH_SUGGESTION_LIMIT: usize = 6;

/// Number of related products on a product page.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// A product for sale.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Regular price.
    pub price: Price,
    /// Price for logged-in members.
    pub member_price: Price,
    /// Primary image URL.
    pub image: String,
    /// Gallery image URLs, primary first.
    pub images: Vec<String>,
    pub description: String,
    pub material: String,
    /// Sizes in display order; accessories use `"One Size"`.
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub gender: Gender,
    pub stock: u32,
    pub featured: bool,
    /// Average rating from the fixture data, 0-5.
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
}

impl Product {
    /// Price the visitor pays: the member price when logged in.
    #[must_use]
    pub fn price_for(&self, member: bool) -> Price {
        if member && self.member_price < self.price {
            self.member_price
        } else {
            self.price
        }
    }

    /// Amount a member saves compared to the regular price.
    #[must_use]
    pub fn member_savings(&self) -> Price {
        self.price.saturating_sub(self.member_price)
    }

    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.stock == 0
    }

    /// Whether `size` is one of the product's sizes.
    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Size used by quick-add buttons on product cards.
    #[must_use]
    pub fn first_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// Case-insensitive match of an already lowercased needle against the
    /// name, category and description.
    #[must_use]
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.category.as_str().to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}

/// A product review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub author: String,
    pub avatar: String,
    /// Star rating, 1-5.
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub date: NaiveDate,
    /// Size the reviewer bought.
    pub size: Option<String>,
    /// Verified purchase.
    pub verified: bool,
    /// Helpful votes.
    pub helpful: u32,
}

/// A line on a past order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_name: String,
    pub quantity: u32,
    pub price: Price,
    pub size: String,
}

/// A past order shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub total: Price,
    pub items: Vec<OrderItem>,
    pub tracking: Option<String>,
}

/// Customer quote on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testimonial {
    pub name: String,
    pub avatar: String,
    pub rating: u8,
    pub comment: String,
    /// Name of the product the customer bought.
    pub product: String,
    pub date: NaiveDate,
}

/// Styled outfit photo on the lookbook page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookbookImage {
    pub id: LookbookImageId,
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Like count before the visitor's own like.
    pub likes: u32,
}

/// Headline numbers on the admin overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub revenue: Price,
    pub orders: u32,
    pub customers: u32,
}

/// Read-only store of every fixture the shop renders.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    reviews: Vec<Review>,
    orders: Vec<Order>,
    testimonials: Vec<Testimonial>,
    lookbook: Vec<LookbookImage>,
    stats: StoreStats,
}

impl Catalog {
    /// Build a catalog from explicit data.
    #[must_use]
    pub const fn new(
        products: Vec<Product>,
        reviews: Vec<Review>,
        orders: Vec<Order>,
        testimonials: Vec<Testimonial>,
        lookbook: Vec<LookbookImage>,
        stats: StoreStats,
    ) -> Self {
        Self {
            products,
            reviews,
            orders,
            testimonials,
            lookbook,
            stats,
        }
    }

    /// The shop's built-in catalog.
    #[must_use]
    pub fn fixtures() -> Self {
        Self::new(
            fixtures::products(),
            fixtures::reviews(),
            fixtures::orders(),
            fixtures::testimonials(),
            fixtures::lookbook(),
            fixtures::store_stats(),
        )
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Products flagged for the home page.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    /// Other products in the same category, in catalog order.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Header search: case-insensitive match on name, category or
    /// description. A blank query yields nothing.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.products
            .iter()
            .filter(|p| p.matches_search(&needle))
            .take(limit)
            .collect()
    }

    /// Fixture reviews for a product.
    pub fn reviews_for<'a>(&'a self, product_id: &'a ProductId) -> impl Iterator<Item = &'a Review> {
        self.reviews.iter().filter(move |r| &r.product_id == product_id)
    }

    /// Look up a fixture review.
    #[must_use]
    pub fn review(&self, id: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id.as_str() == id)
    }

    /// The demo member's order history.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    #[must_use]
    pub fn lookbook(&self) -> &[LookbookImage] {
        &self.lookbook
    }

    #[must_use]
    pub fn lookbook_image(&self, id: &str) -> Option<&LookbookImage> {
        self.lookbook.iter().find(|i| i.id.as_str() == id)
    }

    #[must_use]
    pub const fn stats(&self) -> StoreStats {
        self.stats
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::fixtures()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_lookup() {
        let catalog = Catalog::fixtures();
        assert_eq!(catalog.products().len(), 8);
        assert_eq!(catalog.product("2").unwrap().name, "Urban Hoodie Premium");
        assert!(catalog.product("99").is_none());
    }

    #[test]
    fn test_featured_products() {
        let catalog = Catalog::fixtures();
        let ids: Vec<&str> = catalog.featured().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "5", "6"]);
    }

    #[test]
    fn test_related_same_category_excluding_self() {
        let catalog = Catalog::fixtures();
        let tee = catalog.product("1").unwrap();
        let related: Vec<&str> = catalog
            .related(tee, RELATED_PRODUCTS_LIMIT)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(related, ["5"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_category_description() {
        let catalog = Catalog::fixtures();

        let by_name: Vec<&str> = catalog.search("HOODIE", 6).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(by_name, ["2", "6"]);

        let by_category = catalog.search("aksesoris", 6);
        assert_eq!(by_category.len(), 2);

        let by_description = catalog.search("flanel", 6);
        assert_eq!(by_description[0].id.as_str(), "3");

        assert!(catalog.search("   ", 6).is_empty());
        assert_eq!(catalog.search("a", 6).len(), 6);
    }

    #[test]
    fn test_member_price_only_for_members() {
        let catalog = Catalog::fixtures();
        let cap = catalog.product("4").unwrap();
        assert_eq!(cap.price_for(false), Price::idr(129_000));
        assert_eq!(cap.price_for(true), Price::idr(99_000));
        assert_eq!(cap.member_savings(), Price::idr(30_000));
    }

    #[test]
    fn test_reviews_for_product() {
        let catalog = Catalog::fixtures();
        let id = ProductId::new("2");
        assert_eq!(catalog.reviews_for(&id).count(), 3);
        assert_eq!(catalog.reviews_for(&ProductId::new("8")).count(), 0);
    }

    #[test]
    fn test_first_size_and_sizes() {
        let catalog = Catalog::fixtures();
        let tote = catalog.product("8").unwrap();
        assert_eq!(tote.first_size(), Some("One Size"));
        assert!(tote.has_size("One Size"));
        assert!(!tote.has_size("XL"));
        assert!(!tote.is_sold_out());
    }
}
