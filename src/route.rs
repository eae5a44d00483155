//! Navigation targets emitted by the session manager and route guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! The rendering shell owns the actual router; this crate only names the
//! destinations that session transitions can demand. Guarded page routes
//! beyond the dashboards resolve through [`crate::guard::RouteGuard`], which
//! is parameterized by role rather than by path.

use serde::{Deserialize, Serialize};

/// A navigation destination the session layer can redirect to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Entry/login screen.
    Login,
    /// General (student) dashboard.
    StudentDashboard,
    /// Lecturer dashboard.
    LecturerDashboard,
    /// Administrator dashboard.
    AdminDashboard,
}

impl Route {
    /// The browser path for this destination.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::StudentDashboard => "/dashboard",
            Self::LecturerDashboard => "/lecturer/dashboard",
            Self::AdminDashboard => "/admin/dashboard",
        }
    }
}

#[cfg(test)]
#[path = "route_test.rs"]
mod tests;
