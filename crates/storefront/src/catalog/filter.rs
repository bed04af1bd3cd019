//! Shop page filtering.
//!
//! A [`ShopFilter`] is parsed from the shop page query string. Each facet is
//! an independent predicate and a product is shown only when all of them
//! hold. An empty facet places no constraint.

use febsin_core::{Category, Gender, Price};

use super::Product;

/// Colors offered as filter checkboxes.
pub const COLOR_OPTIONS: [&str; 6] = ["Black", "White", "Navy", "Grey", "Maroon", "Red-Black"];

/// Upper bound of the price slider, in rupiah.
pub const PRICE_RANGE_MAX: i64 = 600_000;

/// Slider step, in rupiah.
pub const PRICE_RANGE_STEP: i64 = 10_000;

/// Filter state for the shop listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopFilter {
    /// Free-text search over name, category and description.
    pub search: String,
    pub categories: Vec<Category>,
    pub genders: Vec<Gender>,
    pub colors: Vec<String>,
    /// Inclusive lower price bound.
    pub price_min: Price,
    /// Inclusive upper price bound.
    pub price_max: Price,
}

impl Default for ShopFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            categories: Vec::new(),
            genders: Vec::new(),
            colors: Vec::new(),
            price_min: Price::zero(),
            price_max: Price::idr(PRICE_RANGE_MAX),
        }
    }
}

impl ShopFilter {
    /// Parse from a raw query string.
    ///
    /// Facets may repeat (`category=Kaos&category=Hoodie`). Unknown
    /// categories, genders or colors and unparsable prices are ignored.
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut filter = Self::default();
        let Some(raw) = raw else {
            return filter;
        };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let value = value.trim();
            match key.as_ref() {
                "search" => value.clone_into(&mut filter.search),
                "category" => {
                    if let Ok(category) = value.parse::<Category>() {
                        push_unique(&mut filter.categories, category);
                    }
                }
                "gender" => {
                    if let Ok(gender) = value.parse::<Gender>() {
                        push_unique(&mut filter.genders, gender);
                    }
                }
                "color" => {
                    if let Some(color) = COLOR_OPTIONS.iter().find(|c| **c == value) {
                        push_unique(&mut filter.colors, (*color).to_string());
                    }
                }
                "price_min" => {
                    if let Ok(amount) = value.parse::<i64>() {
                        filter.price_min = Price::idr(amount.max(0));
                    }
                }
                "price_max" => {
                    if let Ok(amount) = value.parse::<i64>() {
                        filter.price_max = Price::idr(amount.max(0));
                    }
                }
                _ => {}
            }
        }

        filter
    }

    /// Serialize back into a query string (without the leading `?`).
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if !self.search.is_empty() {
            query.append_pair("search", &self.search);
        }
        for category in &self.categories {
            query.append_pair("category", category.as_str());
        }
        for gender in &self.genders {
            query.append_pair("gender", gender.as_str());
        }
        for color in &self.colors {
            query.append_pair("color", color);
        }
        let defaults = Self::default();
        if self.price_min != defaults.price_min {
            query.append_pair("price_min", &self.price_min.amount.to_string());
        }
        if self.price_max != defaults.price_max {
            query.append_pair("price_max", &self.price_max.amount.to_string());
        }
        query.finish()
    }

    /// Whether a product passes every facet.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let search = self.search.trim().to_lowercase();

        let search_ok = search.is_empty() || product.matches_search(&search);
        let category_ok = self.categories.is_empty() || self.categories.contains(&product.category);
        let gender_ok = self.genders.is_empty() || self.genders.contains(&product.gender);
        let color_ok = self.colors.is_empty()
            || product.colors.iter().any(|c| self.colors.contains(c));
        let price_ok = self.price_min <= product.price && product.price <= self.price_max;

        search_ok && category_ok && gender_ok && color_ok && price_ok
    }

    /// Products passing the filter, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    /// Whether any facet differs from its default.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let defaults = Self::default();
        !self.categories.is_empty()
            || !self.genders.is_empty()
            || !self.colors.is_empty()
            || self.price_min != defaults.price_min
            || self.price_max != defaults.price_max
    }

    /// Reset facets and price range, keeping the search text.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            search: self.search.clone(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn has_category(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }

    #[must_use]
    pub fn has_gender(&self, gender: &Gender) -> bool {
        self.genders.contains(gender)
    }

    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_default_filter_shows_everything() {
        let catalog = Catalog::fixtures();
        let filter = ShopFilter::default();
        assert_eq!(filter.apply(catalog.products()).len(), 8);
        assert!(!filter.is_active());
    }

    #[test]
    fn test_from_query_repeated_keys() {
        let filter = ShopFilter::from_query(Some(
            "category=Kaos&category=Hoodie&gender=Pria&color=Navy&color=Purple&price_max=300000",
        ));
        assert_eq!(filter.categories, [Category::Kaos, Category::Hoodie]);
        assert_eq!(filter.genders, [Gender::Pria]);
        assert_eq!(filter.colors, ["Navy"]);
        assert_eq!(filter.price_max, Price::idr(300_000));
        assert!(filter.is_active());
    }

    #[test]
    fn test_from_query_ignores_garbage() {
        let filter = ShopFilter::from_query(Some("category=Sepatu&price_min=abc&foo=bar"));
        assert_eq!(filter, ShopFilter::default());
    }

    #[test]
    fn test_search_decodes_plus_and_percent() {
        let filter = ShopFilter::from_query(Some("search=black+tee"));
        assert_eq!(filter.search, "black tee");

        let catalog = Catalog::fixtures();
        assert_eq!(ids(&filter.apply(catalog.products())), ["1"]);
    }

    #[test]
    fn test_facets_combine_with_and() {
        let catalog = Catalog::fixtures();

        let kaos = ShopFilter::from_query(Some("category=Kaos"));
        assert_eq!(ids(&kaos.apply(catalog.products())), ["1", "5"]);

        let kaos_navy = ShopFilter::from_query(Some("category=Kaos&color=Navy"));
        assert_eq!(ids(&kaos_navy.apply(catalog.products())), ["1"]);

        let pria = ShopFilter::from_query(Some("gender=Pria"));
        assert_eq!(ids(&pria.apply(catalog.products())), ["7"]);

        let nothing = ShopFilter::from_query(Some("category=Aksesoris&gender=Pria"));
        assert!(nothing.apply(catalog.products()).is_empty());
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = Catalog::fixtures();
        let filter = ShopFilter::from_query(Some("price_min=129000&price_max=199000"));
        assert_eq!(ids(&filter.apply(catalog.products())), ["1", "4", "8"]);

        let above_range = ShopFilter::default();
        assert!(
            !above_range
                .apply(catalog.products())
                .iter()
                .any(|p| p.price > Price::idr(PRICE_RANGE_MAX))
        );
    }

    #[test]
    fn test_cleared_keeps_search() {
        let filter = ShopFilter::from_query(Some("search=hoodie&category=Hoodie&price_min=50000"));
        let cleared = filter.cleared();
        assert_eq!(cleared.search, "hoodie");
        assert!(!cleared.is_active());
        assert_eq!(cleared.to_query(), "search=hoodie");
    }

    #[test]
    fn test_to_query_round_trips() {
        let raw = "search=kaos+polo&category=Kemeja&gender=Pria&color=Maroon&price_min=100000";
        let filter = ShopFilter::from_query(Some(raw));
        assert_eq!(ShopFilter::from_query(Some(&filter.to_query())), filter);
    }
}
