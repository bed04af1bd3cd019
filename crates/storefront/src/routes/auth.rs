//! Authentication route handlers.
//!
//! Login and registration are mock flows backed by [`AuthService`]: any
//! well-formed email logs in as the demo member. The member is kept in the
//! session; failures redirect back to the form with an error code.
//!
//! [`AuthService`]: crate::services::AuthService

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::ReturnToForm;
use crate::routes::layout::Layout;
use crate::routes::notice::{redirect_error, redirect_success, safe_return};
use crate::services::Registration;
use crate::state::AppState;

/// Where members land after logging in when no page asked for it.
const AFTER_LOGIN: &str = "/dashboard";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub return_to: Option<String>,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
    pub return_to: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    /// Carried through the form and the tab links.
    pub return_to: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub return_to: String,
}

/// Form page for `path`, keeping `return_to` when it is not the default.
fn form_path(path: &str, return_to: &str) -> String {
    if return_to == AFTER_LOGIN {
        path.to_string()
    } else {
        format!("{path}?return_to={}", urlencoding::encode(return_to))
    }
}

/// Log the member in and tag Sentry events with them.
async fn start_member_session(session: &Session, user: &CurrentUser) -> Result<()> {
    // New session ID on privilege change
    session.cycle_id().await?;
    set_current_user(session, user).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    add_breadcrumb("auth", "Member logged in", Some(&[("user_id", user.id.as_str())]));
    Ok(())
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page. Logged-in members are sent on.
pub async fn login_page(
    Query(query): Query<ReturnToForm>,
    layout: Layout,
) -> Response {
    let return_to = safe_return(query.return_to.as_deref(), AFTER_LOGIN);
    if layout.is_member() {
        return Redirect::to(&return_to).into_response();
    }
    LoginTemplate { layout, return_to }.into_response()
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let return_to = safe_return(form.return_to.as_deref(), AFTER_LOGIN);

    match state.auth().login(&form.email, &form.password).await {
        Ok(user) => {
            start_member_session(&session, &user).await?;
            tracing::info!(user_id = %user.id, "Member logged in");
            Ok(redirect_success(&return_to, "login"))
        }
        Err(e) => {
            tracing::debug!("Login rejected: {e}");
            Ok(redirect_error(&form_path("/auth/login", &return_to), e.code()))
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page. Logged-in members are sent on.
pub async fn register_page(
    Query(query): Query<ReturnToForm>,
    layout: Layout,
) -> Response {
    let return_to = safe_return(query.return_to.as_deref(), AFTER_LOGIN);
    if layout.is_member() {
        return Redirect::to(&return_to).into_response();
    }
    RegisterTemplate { layout, return_to }.into_response()
}

/// Handle registration form submission.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect> {
    let return_to = safe_return(form.return_to.as_deref(), AFTER_LOGIN);
    let registration = Registration {
        name: &form.name,
        email: &form.email,
        password: &form.password,
        password_confirm: &form.password_confirm,
    };
    let today = chrono::Utc::now().date_naive();

    match state.auth().register(registration, today).await {
        Ok(user) => {
            start_member_session(&session, &user).await?;
            tracing::info!(user_id = %user.id, "Member registered");
            Ok(redirect_success(&return_to, "register"))
        }
        Err(e) => {
            tracing::debug!("Registration rejected: {e}");
            Ok(redirect_error(&form_path("/auth/register", &return_to), e.code()))
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Log out. Cart, wishlist and theme stay with the visitor.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(redirect_success("/", "logout"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_path_keeps_custom_return() {
        assert_eq!(form_path("/auth/login", "/dashboard"), "/auth/login");
        assert_eq!(
            form_path("/auth/login", "/product/3?sort=helpful"),
            "/auth/login?return_to=%2Fproduct%2F3%3Fsort%3Dhelpful"
        );
    }
}
