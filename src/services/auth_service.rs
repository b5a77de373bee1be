//! Domain service for accounts and bearer-token sessions.
//!
//! Deliberately simple: tokens are opaque random strings held in memory and
//! never expire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::User;
use crate::plans::PlanTier;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthorized,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists with this email")]
    EmailTaken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Token plus the account it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Registers a Free-tier account and opens a session for it.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] for missing fields, mismatched or short passwords
    /// - [`AuthError::EmailTaken`] if the email is registered
    async fn signup(&self, request: SignupRequest) -> Result<AuthSession, AuthError>;

    async fn logout(&self, token: &str) -> Result<(), AuthError>;

    /// Resolves a bearer token to its user.
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;

    /// Switches the user's plan tier. No payment is involved.
    async fn change_plan(&self, user_id: &str, plan: PlanTier) -> Result<User, AuthError>;

    /// Ensures an account exists, creating it if needed. Used for the demo user.
    async fn ensure_user(
        &self,
        email: &str,
        name: &str,
        password: &str,
        plan: PlanTier,
    ) -> Result<User, AuthError>;
}
