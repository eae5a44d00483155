//! Observable session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and user-aware components read snapshots of this state from
//! the session manager; only the manager mutates it. The default value is
//! the application-start state: loading, with nothing known yet.

use crate::user::{Role, User};

/// Snapshot of "who is logged in and with what role".
#[derive(Clone, Debug)]
pub struct Session {
    /// The authenticated identity, if any.
    pub user: Option<User>,
    /// Whether a session is established.
    pub is_authenticated: bool,
    /// Whether an auth operation is in flight. Forms disable their submit
    /// control while this is set.
    pub loading: bool,
    /// Human-readable message from the last failed operation.
    pub error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self { user: None, is_authenticated: false, loading: true, error: None }
    }
}

/// Coarse view of the session state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// An operation is in flight; guards wait rather than redirect.
    Loading,
    /// Established session with the given role.
    Authenticated(Role),
    /// No session. `Session::error` may say why.
    Unauthenticated,
}

impl Session {
    /// Role of the current user, if authenticated.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        if self.is_authenticated {
            self.user.as_ref().map(|u| u.role)
        } else {
            None
        }
    }

    /// Where this snapshot sits in the state machine.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            return SessionPhase::Loading;
        }
        match self.role() {
            Some(role) => SessionPhase::Authenticated(role),
            None => SessionPhase::Unauthenticated,
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
