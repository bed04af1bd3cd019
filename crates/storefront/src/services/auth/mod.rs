//! Authentication service.
//!
//! There is no account store: login accepts any well-formed email with a
//! non-empty password and returns the demo member, registration returns a
//! fresh member built from the form. Both wait for a configurable delay so
//! the pages behave like they talk to a backend.

mod error;

pub use error::AuthError;

use std::time::Duration;

use chrono::NaiveDate;
use febsin_core::{Email, UserId};

use crate::filters::format_month_year;
use crate::models::CurrentUser;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// ID of every mock member.
const MOCK_USER_ID: &str = "1";

/// Registration form input.
#[derive(Debug, Clone, Copy)]
pub struct Registration<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirm: &'a str,
}

/// Authentication service.
///
/// Handles mock login and registration.
#[derive(Debug, Clone, Copy)]
pub struct AuthService {
    latency: Duration,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::MissingPassword` if the password is empty.
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        self.simulate_latency().await;

        Ok(CurrentUser {
            id: UserId::new(MOCK_USER_ID),
            name: "Member Febsin".to_string(),
            avatar: avatar_url(&email),
            email,
            member_since: "Jan 2024".to_string(),
            points: 150,
        })
    }

    /// Register a new member.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingName` if the name is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::PasswordMismatch` if the passwords differ.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    pub async fn register(
        &self,
        form: Registration<'_>,
        today: NaiveDate,
    ) -> Result<CurrentUser, AuthError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }
        let email = Email::parse(form.email)?;
        validate_password(form.password, form.password_confirm)?;

        self.simulate_latency().await;

        Ok(CurrentUser {
            id: UserId::new(MOCK_USER_ID),
            name: name.to_string(),
            avatar: avatar_url(&email),
            email,
            member_since: format_month_year(today),
            points: 0,
        })
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// Check the password pair.
fn validate_password(password: &str, confirm: &str) -> Result<(), AuthError> {
    if password != confirm {
        return Err(AuthError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Generated avatar seeded by the email address.
#[must_use]
pub fn avatar_url(email: &Email) -> String {
    format!(
        "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
        urlencoding::encode(email.as_str())
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(Duration::ZERO)
    }

    fn registration<'a>(password: &'a str, confirm: &'a str) -> Registration<'a> {
        Registration {
            name: "Sinta",
            email: "sinta@febsin.id",
            password,
            password_confirm: confirm,
        }
    }

    #[tokio::test]
    async fn test_login_returns_demo_member() {
        let user = service().login(" budi@febsin.id ", "rahasia").await.unwrap();
        assert_eq!(user.id.as_str(), "1");
        assert_eq!(user.name, "Member Febsin");
        assert_eq!(user.email.as_str(), "budi@febsin.id");
        assert_eq!(
            user.avatar,
            "https://api.dicebear.com/7.x/avataaars/svg?seed=budi%40febsin.id"
        );
        assert_eq!(user.member_since, "Jan 2024");
        assert_eq!(user.points, 150);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_input() {
        assert!(matches!(
            service().login("not-an-email", "x").await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert_eq!(
            service().login("budi@febsin.id", "").await,
            Err(AuthError::MissingPassword)
        );
    }

    #[tokio::test]
    async fn test_register_builds_new_member() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let user = service()
            .register(registration("rahasia1", "rahasia1"), today)
            .await
            .unwrap();
        assert_eq!(user.name, "Sinta");
        assert_eq!(user.member_since, "Okt 2026");
        assert_eq!(user.points, 0);
    }

    #[tokio::test]
    async fn test_register_password_rules() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(
            service()
                .register(registration("rahasia1", "rahasia2"), today)
                .await,
            Err(AuthError::PasswordMismatch)
        );
        assert_eq!(
            service().register(registration("abc", "abc"), today).await,
            Err(AuthError::WeakPassword { min: 6 })
        );
        assert_eq!(
            AuthError::WeakPassword { min: 6 }.to_string(),
            "Password minimal 6 karakter"
        );

        let mut nameless = registration("rahasia1", "rahasia1");
        nameless.name = " ";
        assert_eq!(
            service().register(nameless, today).await,
            Err(AuthError::MissingName)
        );
    }
}
