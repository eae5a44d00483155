//! Backend auth contract.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session manager talks to whatever stands behind this trait: the real
//! platform API in production, [`crate::mock::MockAuthService`] in
//! development and tests. Which one gets wired is a composition-root
//! decision; the manager's logic never branches on it.

use async_trait::async_trait;

use crate::user::{Credentials, User};

/// Failures surfaced by auth operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Credentials did not match any account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// No token is stored, so there is no session to validate or refresh.
    #[error("missing token")]
    MissingToken,
    /// The stored token is expired or no longer accepted.
    #[error("invalid or expired token")]
    InvalidToken,
    /// The profile could not be fetched for the current token.
    #[error("profile fetch failed: {0}")]
    ProfileFetch(String),
    /// The session could not be renewed.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),
    /// Transport-level failure talking to the backend.
    #[error("network error: {0}")]
    Network(String),
}

/// A successful login: the authenticated identity plus its bearer token.
#[derive(Clone, Debug)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// The contract the session manager expects from an auth backend.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a user and token.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError>;

    /// Invalidate the session server-side. Callers treat failure as
    /// best-effort; the local session is cleared regardless.
    async fn logout(&self, token: &str) -> Result<(), AuthError>;

    /// Exchange the current token for a fresh one.
    async fn refresh_token(&self, token: &str) -> Result<String, AuthError>;

    /// Fetch the profile for the current token.
    async fn get_profile(&self, token: &str) -> Result<User, AuthError>;
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
