//! Mock auth backend for development and tests.
//!
//! DESIGN
//! ======
//! Reproduces the platform's development credential table and the dev
//! bypass role switch behind the [`AuthService`] seam, so nothing inside
//! the session manager knows mock mode exists. Issued tokens are opaque
//! (`mock-token-<hex>`) and tracked in an in-memory map, which lets
//! `get_profile` and `refresh_token` behave like a stateful backend instead
//! of answering success unconditionally.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::service::{AuthError, AuthService, LoginResponse};
use crate::token::generate_token;
use crate::user::{Credentials, Role, User};

/// Simulated network latency applied to every call, matching the source's
/// one-second login delay.
pub const DEFAULT_LATENCY: Duration = Duration::from_secs(1);

/// The credentials the dev bypass uses to impersonate a role.
#[must_use]
pub fn bypass_credentials(role: Role) -> Credentials {
    let (nim, password) = match role {
        Role::Student => ("12345678", "password"),
        Role::Lecturer => ("87654321", "lecturer"),
        Role::Admin => ("admin", "admin123"),
    };
    Credentials { nim: nim.to_owned(), password: password.to_owned() }
}

/// Canned profile for a role, matching the development fixture table.
#[must_use]
pub fn mock_user(role: Role) -> User {
    let classes = json!([
        { "id": 1, "name": "Programming Fundamentals", "code": "COMP6047", "semester": "2024/2025-1" },
        { "id": 2, "name": "Data Structures", "code": "COMP6048", "semester": "2024/2025-1" },
        { "id": 3, "name": "Algorithm Design", "code": "COMP6049", "semester": "2024/2025-1" },
    ]);

    let (nim, name, email, details) = match role {
        Role::Student => (
            "12345678",
            "John Doe",
            "12345678@binus.ac.id",
            json!({ "enrolledClasses": classes }),
        ),
        Role::Lecturer => (
            "87654321",
            "Dr. Sarah Johnson",
            "sarah.johnson@binus.ac.id",
            json!({ "department": "Computer Science", "assignedClasses": classes }),
        ),
        Role::Admin => (
            "admin",
            "Dr. Michael Chen",
            "michael.chen@binus.ac.id",
            json!({ "department": "Software Laboratory Center", "assignedClasses": [] }),
        ),
    };

    let details = match details {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    User {
        nim: nim.to_owned(),
        name: name.to_owned(),
        email: email.to_owned(),
        role,
        details,
    }
}

/// In-memory stand-in for the platform auth API.
pub struct MockAuthService {
    latency: Duration,
    /// Issued token -> user, so profile fetch and refresh track real state.
    sessions: Mutex<HashMap<String, User>>,
}

impl MockAuthService {
    /// Mock service with the source's one-second simulated delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_LATENCY)
    }

    /// Mock service with an explicit delay. Tests pass `Duration::ZERO`.
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency, sessions: Mutex::new(HashMap::new()) }
    }

    fn issue_token() -> String {
        format!("mock-token-{}", generate_token())
    }

    fn user_for(credentials: &Credentials) -> Option<User> {
        let role = match (credentials.nim.as_str(), credentials.password.as_str()) {
            ("12345678", "password") => Role::Student,
            ("87654321", "lecturer") => Role::Lecturer,
            ("admin", "admin123") => Role::Admin,
            _ => return None,
        };
        Some(mock_user(role))
    }

    async fn simulate_delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockAuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        self.simulate_delay().await;
        let user = Self::user_for(credentials).ok_or(AuthError::InvalidCredentials)?;
        let token = Self::issue_token();
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.insert(token.clone(), user.clone());
        }
        Ok(LoginResponse { user, token })
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.simulate_delay().await;
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.remove(token);
        }
        Ok(())
    }

    async fn refresh_token(&self, token: &str) -> Result<String, AuthError> {
        self.simulate_delay().await;
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| AuthError::RefreshFailed("mock state poisoned".into()))?;
        let Some(user) = sessions.remove(token) else {
            return Err(AuthError::RefreshFailed("unknown session".into()));
        };
        let fresh = Self::issue_token();
        sessions.insert(fresh.clone(), user);
        Ok(fresh)
    }

    async fn get_profile(&self, token: &str) -> Result<User, AuthError> {
        self.simulate_delay().await;
        self.sessions
            .lock()
            .ok()
            .and_then(|sessions| sessions.get(token).cloned())
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
#[path = "mock_test.rs"]
mod tests;
