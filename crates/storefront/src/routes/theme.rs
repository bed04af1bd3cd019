//! Light/dark theme switch.

use axum::{Form, response::Redirect};
use febsin_core::Theme;
use tower_sessions::Session;

use crate::error::Result;
use crate::models::session::{self, keys};
use crate::routes::ReturnToForm;
use crate::routes::notice::safe_return;

/// Flip the theme stored in the session and go back.
pub async fn toggle(session: Session, Form(form): Form<ReturnToForm>) -> Result<Redirect> {
    let theme: Theme = session::load(&session, keys::THEME).await?;
    session::store(&session, keys::THEME, &theme.toggled()).await?;
    Ok(Redirect::to(&safe_return(form.return_to.as_deref(), "/")))
}
