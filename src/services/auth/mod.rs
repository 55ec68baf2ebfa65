//! Email/password authentication

use crate::models::Session;

pub mod identity_toolkit;

pub use identity_toolkit::IdentityToolkitAuth;

/// Why an auth call failed, each with the message shown to the user
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    #[error("This email is already registered. Try signing in.")]
    EmailInUse,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password should be at least 6 characters.")]
    WeakPassword,
    #[error("No account found with this email.")]
    UserNotFound,
    #[error("Incorrect password. Please try again.")]
    WrongPassword,
    #[error("Invalid email or password.")]
    InvalidCredential,
    #[error("Too many failed attempts. Please try again later.")]
    RateLimited,
    #[error("Network error. Check your connection.")]
    NetworkFailure,
    #[error("An unexpected error occurred. Please try again.")]
    Unknown,
}

impl AuthErrorKind {
    /// Maps a provider error code to a kind.
    ///
    /// Accepts both REST codes (`EMAIL_EXISTS`, optionally followed by
    /// ` : detail`) and SDK-style codes (`auth/email-already-in-use`).
    pub fn from_provider_code(code: &str) -> Self {
        let code = code
            .split(" : ")
            .next()
            .unwrap_or_default()
            .trim();

        match code {
            "EMAIL_EXISTS" | "auth/email-already-in-use" => AuthErrorKind::EmailInUse,
            "INVALID_EMAIL" | "auth/invalid-email" => AuthErrorKind::InvalidEmail,
            "WEAK_PASSWORD" | "auth/weak-password" => AuthErrorKind::WeakPassword,
            "EMAIL_NOT_FOUND" | "auth/user-not-found" => AuthErrorKind::UserNotFound,
            "INVALID_PASSWORD" | "auth/wrong-password" => AuthErrorKind::WrongPassword,
            "INVALID_LOGIN_CREDENTIALS" | "auth/invalid-credential" => {
                AuthErrorKind::InvalidCredential
            }
            "TOO_MANY_ATTEMPTS_TRY_LATER" | "auth/too-many-requests" => {
                AuthErrorKind::RateLimited
            }
            "auth/network-request-failed" => AuthErrorKind::NetworkFailure,
            _ => AuthErrorKind::Unknown,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    async fn register(&self, email: &str, password: &str) -> Result<Session, AuthErrorKind>;

    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthErrorKind>;

    async fn logout(&self) -> Result<(), String>;
}
