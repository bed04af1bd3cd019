//! About and lookbook pages.
//!
//! ```text
//! GET  /about                - About page from `content/pages/about.md`
//! GET  /lookbook             - Lookbook gallery
//! POST /lookbook/{id}/like   - Toggle a like (members only)
//! ```

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::LookbookImage;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::session::{self, keys};
use crate::routes::ReturnToForm;
use crate::routes::layout::{Layout, NotFoundTemplate};
use crate::routes::notice::{redirect_success, safe_return};
use crate::state::AppState;

// =============================================================================
// About
// =============================================================================

/// Markdown content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
    pub title: String,
    pub description: String,
    pub hero_image: Option<String>,
    pub content_html: String,
}

/// Display the About page.
#[instrument(skip(state, layout))]
pub async fn about(State(state): State<AppState>, layout: Layout) -> Response {
    let Some(page) = state.content().get_page("about") else {
        return NotFoundTemplate::respond(layout, "Halaman tidak ditemukan", "/", "Kembali ke Beranda");
    };

    AboutTemplate {
        layout,
        title: page.meta.title.clone(),
        description: page.meta.description.clone().unwrap_or_default(),
        hero_image: page.meta.hero_image.clone(),
        content_html: page.content_html.clone(),
    }
    .into_response()
}

// =============================================================================
// Lookbook
// =============================================================================

/// Lookbook photo with the visitor's like applied.
#[derive(Clone)]
pub struct LookbookImageView {
    pub id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub likes: u32,
    pub liked: bool,
}

impl LookbookImageView {
    fn new(image: &LookbookImage, liked: bool) -> Self {
        Self {
            id: image.id.to_string(),
            url: image.url.clone(),
            title: image.title.clone(),
            description: image.description.clone(),
            category: image.category.clone(),
            likes: image.likes + u32::from(liked),
            liked,
        }
    }
}

/// Lookbook page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/lookbook.html")]
pub struct LookbookTemplate {
    pub layout: Layout,
    pub images: Vec<LookbookImageView>,
}

/// Display the lookbook gallery.
#[instrument(skip(state, session, layout))]
pub async fn lookbook(
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
) -> Result<impl IntoResponse> {
    let liked: Vec<String> = session::load(&session, keys::LOOKBOOK_LIKES).await?;

    Ok(LookbookTemplate {
        layout,
        images: state
            .catalog()
            .lookbook()
            .iter()
            .map(|image| LookbookImageView::new(image, liked.iter().any(|id| id == image.id.as_str())))
            .collect(),
    })
}

/// Like or unlike a lookbook photo.
#[instrument(skip(state, session, user, form), fields(user_id = %user.id))]
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ReturnToForm>,
) -> Result<Redirect> {
    let image = state
        .catalog()
        .lookbook_image(&id)
        .ok_or_else(|| AppError::NotFound(format!("lookbook image {id}")))?;

    let liked = session::toggle_in_set(&session, keys::LOOKBOOK_LIKES, image.id.as_str()).await?;

    let mut back = safe_return(form.return_to.as_deref(), "/lookbook");
    if !back.contains('#') {
        back.push_str(&format!("#look-{}", image.id));
    }
    Ok(redirect_success(&back, if liked { "liked" } else { "unliked" }))
}
