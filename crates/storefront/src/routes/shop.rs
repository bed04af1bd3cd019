//! Shop listing and product detail handlers.
//!
//! ```text
//! GET  /shop                   - Filtered product listing
//! GET  /product/{id}           - Product detail with reviews
//! POST /product/{id}/reviews   - Write a review (members only)
//! POST /reviews/{id}/helpful   - Toggle a helpful vote
//! ```

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, RawQuery, State},
    response::{IntoResponse, Redirect, Response},
};
use febsin_core::{Category, Gender, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::filter::{COLOR_OPTIONS, PRICE_RANGE_MAX, PRICE_RANGE_STEP};
use crate::catalog::reviews::{RatingRow, display_rating, filled_stars, sort_reviews};
use crate::catalog::{
    NewReview, Product, RELATED_PRODUCTS_LIMIT, RatingSummary, Review, ReviewSort, ShopFilter,
};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::Wishlist;
use crate::models::session::{self, keys};
use crate::routes::ReturnToForm;
use crate::routes::layout::{Layout, NotFoundTemplate, ProductCardView};
use crate::routes::notice::{redirect_error, redirect_success, safe_return};
use crate::state::AppState;

// =============================================================================
// Shop listing
// =============================================================================

/// A filter checkbox.
#[derive(Clone)]
pub struct FacetOption {
    pub value: String,
    pub checked: bool,
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopTemplate {
    pub layout: Layout,
    pub search: String,
    pub categories: Vec<FacetOption>,
    pub genders: Vec<FacetOption>,
    pub colors: Vec<FacetOption>,
    pub price_min: String,
    pub price_max: String,
    pub price_range_max: i64,
    pub price_step: i64,
    /// "Rp 0 - Rp 600.000" label for the current range.
    pub price_label: String,
    pub products: Vec<ProductCardView>,
    pub filters_active: bool,
    /// Link that clears facets but keeps the search text.
    pub reset_href: String,
}

/// Display the shop with filters from the query string.
#[instrument(skip(state, session, layout))]
pub async fn index(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    session: Session,
    layout: Layout,
) -> Result<impl IntoResponse> {
    let filter = ShopFilter::from_query(query.as_deref());
    let wishlist: Wishlist = session::load(&session, keys::WISHLIST).await?;
    let products = filter.apply(state.catalog().products());

    tracing::debug!(results = products.len(), "Shop filtered");

    let cleared = filter.cleared().to_query();
    let reset_href = if cleared.is_empty() {
        "/shop".to_string()
    } else {
        format!("/shop?{cleared}")
    };

    Ok(ShopTemplate {
        search: filter.search.clone(),
        categories: Category::ALL
            .iter()
            .map(|c| FacetOption {
                value: c.to_string(),
                checked: filter.has_category(c),
            })
            .collect(),
        genders: Gender::ALL
            .iter()
            .map(|g| FacetOption {
                value: g.to_string(),
                checked: filter.has_gender(g),
            })
            .collect(),
        colors: COLOR_OPTIONS
            .iter()
            .map(|c| FacetOption {
                value: (*c).to_string(),
                checked: filter.has_color(c),
            })
            .collect(),
        price_min: filter.price_min.amount.to_string(),
        price_max: filter.price_max.amount.to_string(),
        price_range_max: PRICE_RANGE_MAX,
        price_step: PRICE_RANGE_STEP,
        price_label: format!(
            "{} - {}",
            filter.price_min.display(),
            filter.price_max.display()
        ),
        products: ProductCardView::list(products, layout.is_member(), &wishlist),
        filters_active: filter.is_active(),
        reset_href,
        layout,
    })
}

// =============================================================================
// Product detail
// =============================================================================

/// Product data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub gender: String,
    pub description: String,
    pub material: String,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub sizes_joined: String,
    pub colors_joined: String,
    pub price: String,
    pub regular_price: Option<String>,
    /// Member saving on this product, shown to logged-in members.
    pub savings: Option<String>,
    pub stock: u32,
    pub sold_out: bool,
    pub featured: bool,
    pub in_wishlist: bool,
}

impl ProductDetailView {
    fn new(product: &Product, member: bool, wishlist: &Wishlist) -> Self {
        let price = product.price_for(member);
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.to_string(),
            gender: product.gender.to_string(),
            description: product.description.clone(),
            material: product.material.clone(),
            images: product.images.clone(),
            sizes: product.sizes.clone(),
            sizes_joined: product.sizes.join(", "),
            colors_joined: product.colors.join(", "),
            price: price.display(),
            regular_price: (price < product.price).then(|| product.price.display()),
            savings: Some(product.member_savings())
                .filter(|s| member && !s.is_zero())
                .map(|s| s.display()),
            stock: product.stock,
            sold_out: product.is_sold_out(),
            featured: product.featured,
            in_wishlist: wishlist.contains(&product.id),
        }
    }
}

/// One review as shown in the list.
#[derive(Clone)]
pub struct ReviewView {
    pub id: String,
    pub author: String,
    pub avatar: String,
    /// First letter of the author, shown when the avatar fails.
    pub initial: String,
    pub stars: u8,
    pub title: String,
    pub comment: String,
    pub date: String,
    pub size: Option<String>,
    pub verified: bool,
    /// Includes the visitor's own vote.
    pub helpful: u32,
    pub voted: bool,
}

impl ReviewView {
    fn new(review: &Review, voted: bool) -> Self {
        Self {
            id: review.id.to_string(),
            author: review.author.clone(),
            avatar: review.avatar.clone(),
            initial: review.author.chars().next().map(String::from).unwrap_or_default(),
            stars: review.rating.min(5),
            title: review.title.clone(),
            comment: review.comment.clone(),
            date: filters::format_date(review.date),
            size: review.size.clone(),
            verified: review.verified,
            helpful: review.helpful + u32::from(voted),
            voted,
        }
    }
}

/// Rating distribution row with a CSS width class.
#[derive(Clone)]
pub struct RatingRowView {
    pub stars: u8,
    pub count: usize,
    pub percentage: u32,
    /// Bar width rounded to 5% steps, used as `bar-w-{n}`.
    pub width_class: u32,
}

impl From<&RatingRow> for RatingRowView {
    fn from(row: &RatingRow) -> Self {
        Self {
            stars: row.stars,
            count: row.count,
            percentage: row.percentage,
            width_class: round_to_step(row.bar_width),
        }
    }
}

/// Round a percentage to the nearest multiple of 5.
const fn round_to_step(width: u32) -> u32 {
    let stepped = (width + 2) / 5 * 5;
    if stepped > 100 { 100 } else { stepped }
}

/// Review sort button.
#[derive(Clone)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/product.html")]
pub struct ProductTemplate {
    pub layout: Layout,
    pub product: ProductDetailView,
    pub average: String,
    pub average_stars: u8,
    pub show_rating: bool,
    pub review_count: usize,
    pub rating_rows: Vec<RatingRowView>,
    pub reviews: Vec<ReviewView>,
    pub sort_options: Vec<SortOption>,
    pub sort: &'static str,
    pub related: Vec<ProductCardView>,
    /// Free-shipping threshold for the info list.
    pub free_shipping_from: String,
}

/// Product page query.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub sort: Option<String>,
}

fn parse_sort(value: Option<&str>) -> ReviewSort {
    value
        .and_then(|v| ReviewSort::ALL.into_iter().find(|s| s.as_str() == v))
        .unwrap_or_default()
}

/// Fixture reviews plus the visitor's own reviews for one product.
async fn visible_reviews(
    state: &AppState,
    session: &Session,
    product_id: &ProductId,
) -> Result<Vec<Review>> {
    let submitted: Vec<Review> = session::load(session, keys::SUBMITTED_REVIEWS).await?;
    Ok(state
        .catalog()
        .reviews_for(product_id)
        .cloned()
        .chain(submitted.into_iter().filter(|r| &r.product_id == product_id))
        .collect())
}

/// Display a product with its reviews and related products.
#[instrument(skip(state, session, layout, query))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ProductQuery>,
    session: Session,
    layout: Layout,
) -> Result<Response> {
    let Some(product) = state.catalog().product(&id) else {
        return Ok(NotFoundTemplate::respond(
            layout,
            "Produk tidak ditemukan",
            "/shop",
            "Kembali ke Shop",
        ));
    };

    let member = layout.is_member();
    let wishlist: Wishlist = session::load(&session, keys::WISHLIST).await?;
    let votes: Vec<String> = session::load(&session, keys::HELPFUL_VOTES).await?;

    let mut reviews = visible_reviews(&state, &session, &product.id).await?;
    let summary = RatingSummary::from_reviews(&reviews);
    let sort = parse_sort(query.sort.as_deref());
    sort_reviews(&mut reviews, sort);

    let average = display_rating(product.rating, &summary);

    let review_views = reviews
        .iter()
        .map(|r| ReviewView::new(r, votes.iter().any(|v| v == r.id.as_str())))
        .collect();

    Ok(ProductTemplate {
        product: ProductDetailView::new(product, member, &wishlist),
        average: format!("{average:.1}"),
        average_stars: filled_stars(average),
        show_rating: average > 0.0,
        review_count: summary.count,
        rating_rows: summary.rows.iter().map(RatingRowView::from).collect(),
        reviews: review_views,
        sort_options: ReviewSort::ALL
            .iter()
            .map(|s| SortOption {
                value: s.as_str(),
                label: s.label(),
                active: *s == sort,
            })
            .collect(),
        sort: sort.as_str(),
        related: ProductCardView::list(
            state.catalog().related(product, RELATED_PRODUCTS_LIMIT),
            member,
            &wishlist,
        ),
        free_shipping_from: state.config().shipping.free_threshold.display(),
        layout,
    }
    .into_response())
}

// =============================================================================
// Reviews
// =============================================================================

/// Store a review written by the logged-in member.
///
/// Reviews live in the visitor's session next to the fixture reviews.
#[instrument(skip(state, session, user, form), fields(user_id = %user.id))]
pub async fn submit_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(form): Form<NewReview>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .product(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let back = format!("/product/{}#reviews", product.id);

    let today = chrono::Utc::now().date_naive();
    let review = match form.into_review(product.id.clone(), &user.name, &user.avatar, today) {
        Ok(review) => review,
        Err(e) => {
            tracing::debug!("Review rejected: {e}");
            return Ok(redirect_error(&back, e.code()));
        }
    };

    let mut submitted: Vec<Review> = session::load(&session, keys::SUBMITTED_REVIEWS).await?;
    add_breadcrumb(
        "review",
        "Review submitted",
        Some(&[("product_id", product.id.as_str()), ("review_id", review.id.as_str())]),
    );
    submitted.push(review);
    session::store(&session, keys::SUBMITTED_REVIEWS, &submitted).await?;

    Ok(redirect_success(&back, "review_submitted"))
}

/// Toggle the visitor's helpful vote on a review.
#[instrument(skip(state, session, form))]
pub async fn toggle_helpful(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Session,
    Form(form): Form<ReturnToForm>,
) -> Result<Redirect> {
    let product_id = match state.catalog().review(&id) {
        Some(review) => review.product_id.clone(),
        None => {
            let submitted: Vec<Review> =
                session::load(&session, keys::SUBMITTED_REVIEWS).await?;
            submitted
                .into_iter()
                .find(|r| r.id.as_str() == id)
                .map(|r| r.product_id)
                .ok_or_else(|| AppError::NotFound(format!("review {id}")))?
        }
    };

    let voted = session::toggle_in_set(&session, keys::HELPFUL_VOTES, &id).await?;
    tracing::debug!(voted, "Helpful vote toggled");

    let mut back = safe_return(form.return_to.as_deref(), &format!("/product/{product_id}"));
    if !back.contains('#') {
        back.push_str("#reviews");
    }
    Ok(Redirect::to(&back))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_defaults_to_recent() {
        assert_eq!(parse_sort(Some("helpful")), ReviewSort::Helpful);
        assert_eq!(parse_sort(Some("lowest")), ReviewSort::Lowest);
        assert_eq!(parse_sort(Some("random")), ReviewSort::Recent);
        assert_eq!(parse_sort(None), ReviewSort::Recent);
    }

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(0), 0);
        assert_eq!(round_to_step(5), 5);
        assert_eq!(round_to_step(33), 35);
        assert_eq!(round_to_step(67), 65);
        assert_eq!(round_to_step(100), 100);
    }
}
