//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::Testimonial;
use crate::error::Result;
use crate::filters;
use crate::models::Wishlist;
use crate::models::session::{self, keys};
use crate::routes::blog::PostView;
use crate::routes::layout::{Layout, ProductCardView};
use crate::state::AppState;

/// Posts shown in the "from the blog" strip.
const LATEST_POSTS_COUNT: usize = 3;

/// Photos in the "Follow Us" strip.
const INSTAGRAM_STRIP_COUNT: usize = 4;

/// Testimonial card.
#[derive(Clone)]
pub struct TestimonialView {
    pub name: String,
    pub avatar: String,
    /// Star count, 1-5.
    pub stars: u8,
    pub comment: String,
    pub product: String,
    pub date: String,
}

impl From<&Testimonial> for TestimonialView {
    fn from(t: &Testimonial) -> Self {
        Self {
            name: t.name.clone(),
            avatar: t.avatar.clone(),
            stars: t.rating.min(5),
            comment: t.comment.clone(),
            product: t.product.clone(),
            date: filters::format_date(t.date),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub featured: Vec<ProductCardView>,
    pub testimonials: Vec<TestimonialView>,
    pub latest_posts: Vec<PostView>,
    /// Image URLs for the Instagram strip.
    pub instagram: Vec<String>,
}

/// Display the home page.
#[instrument(skip(state, session, layout))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
) -> Result<impl IntoResponse> {
    let wishlist: Wishlist = session::load(&session, keys::WISHLIST).await?;
    let catalog = state.catalog();

    Ok(HomeTemplate {
        featured: ProductCardView::list(catalog.featured(), layout.is_member(), &wishlist),
        testimonials: catalog.testimonials().iter().map(TestimonialView::from).collect(),
        latest_posts: state
            .content()
            .get_recent_posts(LATEST_POSTS_COUNT, None)
            .into_iter()
            .map(PostView::from)
            .collect(),
        instagram: catalog
            .lookbook()
            .iter()
            .take(INSTAGRAM_STRIP_COUNT)
            .map(|image| image.url.clone())
            .collect(),
        layout,
    })
}
