//! Contact page and form.
//!
//! Messages are not delivered anywhere; a valid submission is logged and
//! acknowledged with a notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect},
};
use febsin_core::Email;
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::routes::layout::Layout;
use crate::routes::notice::{redirect_error, redirect_success};

/// Contact form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Notice code for the first problem, if any.
    fn problem(&self) -> Option<&'static str> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|v| v.trim().is_empty()) {
            return Some("contact_fields");
        }
        if Email::parse(&self.email).is_err() {
            return Some("invalid_email");
        }
        None
    }
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    /// `wa.me` link for the customer service number.
    pub whatsapp_href: String,
}

/// Display the contact page.
pub async fn show(layout: Layout) -> impl IntoResponse {
    let whatsapp_href = format!("https://wa.me/{}", layout.contact_number);
    ContactTemplate {
        layout,
        whatsapp_href,
    }
}

/// Handle the contact form.
#[instrument(skip(form))]
pub async fn submit(Form(form): Form<ContactForm>) -> Redirect {
    if let Some(code) = form.problem() {
        return redirect_error("/contact", code);
    }

    tracing::info!(subject = %form.subject.trim(), "Contact message received");
    redirect_success("/contact", "contact_sent")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Sari".to_string(),
            email: "sari@example.com".to_string(),
            subject: "Ukuran".to_string(),
            message: "Apakah hoodie ready size XL?".to_string(),
        }
    }

    #[test]
    fn test_contact_form_presence_checks() {
        assert_eq!(form().problem(), None);

        let blank = ContactForm {
            message: "   ".to_string(),
            ..form()
        };
        assert_eq!(blank.problem(), Some("contact_fields"));

        let bad_email = ContactForm {
            email: "sari".to_string(),
            ..form()
        };
        assert_eq!(bad_email.problem(), Some("invalid_email"));
    }
}
