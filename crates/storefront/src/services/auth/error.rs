//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during (mock) login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] febsin_core::EmailError),

    /// Name left blank on registration.
    #[error("Nama wajib diisi")]
    MissingName,

    /// Password left blank.
    #[error("Password wajib diisi")]
    MissingPassword,

    /// Password and confirmation differ.
    #[error("Password tidak cocok!")]
    PasswordMismatch,

    /// Password too short.
    #[error("Password minimal {min} karakter")]
    WeakPassword {
        /// Minimum accepted length.
        min: usize,
    },
}

impl AuthError {
    /// Notice code used in redirects.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) => "invalid_email",
            Self::MissingName => "missing_name",
            Self::MissingPassword => "missing_password",
            Self::PasswordMismatch => "password_mismatch",
            Self::WeakPassword { .. } => "weak_password",
        }
    }
}
