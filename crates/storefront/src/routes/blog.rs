//! Blog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::content::Post;
use crate::filters;
use crate::routes::layout::{Layout, NotFoundTemplate};
use crate::state::AppState;

/// Post view for templates.
#[derive(Clone)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    /// Date as printed, e.g. `20 Okt 2025`.
    pub date: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub content_html: String,
    pub reading_time_minutes: u32,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.meta.title.clone(),
            excerpt: post.meta.description.clone().unwrap_or_default(),
            author: post
                .meta
                .author
                .clone()
                .unwrap_or_else(|| "Tim Febsin".to_string()),
            date: filters::format_date(post.meta.published_at),
            image: post.meta.featured_image.clone(),
            category: post.meta.category.clone(),
            content_html: post.content_html.clone(),
            reading_time_minutes: post.reading_time_minutes,
        }
    }
}

/// Blog index page template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub layout: Layout,
    /// Newest post, shown large.
    pub featured: Option<PostView>,
    pub posts: Vec<PostView>,
}

/// Blog post detail template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub layout: Layout,
    pub post: PostView,
    pub related_posts: Vec<PostView>,
    /// Absolute URL of this post for the share links.
    pub share_url: String,
}

/// Number of related posts under an article.
const RELATED_POSTS_COUNT: usize = 3;

/// Display the blog index: the newest post featured, the rest in a grid.
#[instrument(skip(state, layout))]
pub async fn index(State(state): State<AppState>, layout: Layout) -> impl IntoResponse {
    let mut posts = state.content().get_published_posts().map(PostView::from);
    let featured = posts.next();

    BlogIndexTemplate {
        layout,
        featured,
        posts: posts.collect(),
    }
}

/// Display a single blog post by slug.
///
/// Unknown slugs and drafts render the not-found page.
#[instrument(skip(state, layout))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    layout: Layout,
) -> Response {
    let Some(post) = state.content().get_post(&slug) else {
        return NotFoundTemplate::respond(
            layout,
            "Artikel tidak ditemukan",
            "/blog",
            "Kembali ke Blog",
        );
    };

    let related_posts = state
        .content()
        .get_recent_posts(RELATED_POSTS_COUNT, Some(&slug))
        .into_iter()
        .map(PostView::from)
        .collect();

    let share_url = format!(
        "{}/blog/{}",
        state.config().base_url.trim_end_matches('/'),
        post.slug
    );

    BlogShowTemplate {
        layout,
        post: PostView::from(post),
        related_posts,
        share_url,
    }
    .into_response()
}
