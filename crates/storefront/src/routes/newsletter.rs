//! Newsletter signup from the footer.

use axum::{Form, response::Redirect};
use febsin_core::Email;
use serde::Deserialize;
use tracing::instrument;

use crate::routes::notice::{redirect_error, redirect_success, safe_return};

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
    pub return_to: Option<String>,
}

/// Subscribe to the newsletter.
///
/// No list is kept; a well-formed address is acknowledged with a notice.
#[instrument(skip(form))]
pub async fn subscribe(Form(form): Form<SubscribeForm>) -> Redirect {
    let back = safe_return(form.return_to.as_deref(), "/");

    match Email::parse(&form.email) {
        Ok(email) => {
            tracing::info!(domain = email.domain(), "Newsletter signup");
            redirect_success(&back, "newsletter")
        }
        Err(e) => {
            tracing::debug!("Newsletter signup rejected: {e}");
            redirect_error(&back, "invalid_email")
        }
    }
}
