//! Role-based route guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! A guard gates the rendering of a page subtree behind a required role.
//! Evaluation is a pure function of the current [`Session`] snapshot, so
//! the shell re-evaluates on every navigation and on every session change —
//! a logout elsewhere or the expiry watchdog firing must take effect on the
//! next render, not only at mount time.

use crate::route::Route;
use crate::session::Session;
use crate::user::Role;

/// What the shell should do with a guarded subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// An auth operation is in flight: render a placeholder, navigate
    /// nowhere.
    Wait,
    /// No session: redirect to the entry/login route.
    RedirectToLogin,
    /// Authenticated with the wrong role: bounce to that user's own home,
    /// never to login and never to the guarded content.
    Redirect(Route),
    /// Authenticated with the required role: render the subtree.
    Render,
}

/// Access-control check for one required role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteGuard {
    required: Role,
}

impl RouteGuard {
    #[must_use]
    pub fn new(required: Role) -> Self {
        Self { required }
    }

    /// The role this guard admits.
    #[must_use]
    pub fn required_role(self) -> Role {
        self.required
    }

    /// Decide for the given session snapshot.
    #[must_use]
    pub fn evaluate(self, session: &Session) -> GuardDecision {
        if session.loading {
            return GuardDecision::Wait;
        }
        // An authenticated flag without a user record violates the session
        // invariant and reads as "not authenticated".
        let Some(role) = session.role() else {
            return GuardDecision::RedirectToLogin;
        };
        if role == self.required {
            GuardDecision::Render
        } else {
            GuardDecision::Redirect(role.home_route())
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
