//! Header search suggestions.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::{Product, SEARCH_SUGGESTION_LIMIT};
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Search suggestions query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// One suggestion row.
#[derive(Clone)]
pub struct SuggestionView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image: String,
    pub price: String,
}

impl SuggestionView {
    fn new(product: &Product, member: bool) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.to_string(),
            image: product.image.clone(),
            price: product.price_for(member).display(),
        }
    }
}

/// Search suggestions fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_suggestions.html")]
pub struct SearchSuggestionsTemplate {
    pub query: String,
    pub suggestions: Vec<SuggestionView>,
    /// All matches, not only the ones shown.
    pub total: usize,
    /// `/shop?search=...` for the "see all" link.
    pub shop_href: String,
}

/// Suggestions for the search dialog. A blank query renders nothing.
#[instrument(skip(state, user))]
pub async fn suggest(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<SuggestQuery>,
) -> impl IntoResponse {
    let q = query.q.trim().to_string();
    let member = user.is_some();
    let catalog = state.catalog();

    let suggestions: Vec<SuggestionView> = catalog
        .search(&q, SEARCH_SUGGESTION_LIMIT)
        .into_iter()
        .map(|p| SuggestionView::new(p, member))
        .collect();
    let total = if q.is_empty() {
        0
    } else {
        let needle = q.to_lowercase();
        catalog
            .products()
            .iter()
            .filter(|p| p.matches_search(&needle))
            .count()
    };

    let shop_href = format!("/shop?search={}", urlencoding::encode(&q));

    SearchSuggestionsTemplate {
        query: q,
        suggestions,
        total,
        shop_href,
    }
}
