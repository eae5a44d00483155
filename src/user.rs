//! Identity model for the NEPTUNE platform.
//!
//! SYSTEM CONTEXT
//! ==============
//! A [`User`] is created at login time, stays immutable for the lifetime of
//! the session, and is discarded at logout. Role-specific attributes
//! (enrolled classes for students, department and assigned classes for
//! lecturers) are carried as a flattened JSON map so the persisted layout
//! matches what the backend returns without a schema per role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::route::Route;

/// Platform role. Determines which route guards pass and which home route
/// redirects target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Lecturer,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Lecturer => "lecturer",
            Self::Admin => "admin",
        }
    }

    /// The dashboard this role lands on after login and when bounced off a
    /// guard for another role.
    #[must_use]
    pub fn home_route(self) -> Route {
        match self {
            Self::Student => Route::StudentDashboard,
            Self::Lecturer => Route::LecturerDashboard,
            Self::Admin => Route::AdminDashboard,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role string.
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "lecturer" => Ok(Self::Lecturer),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// A class reference as it appears in enrolled/assigned class lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRef {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub semester: String,
}

/// The authenticated identity for the current session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    /// Student NIM or staff/admin identifier.
    pub nim: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Platform role.
    pub role: Role,
    /// Role-specific attributes: `enrolledClasses` for students,
    /// `department` and `assignedClasses` for lecturers and admins.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl User {
    /// Enrolled classes for students, assigned classes for lecturers.
    /// Empty for roles that carry neither.
    #[must_use]
    pub fn classes(&self) -> Vec<ClassRef> {
        let key = match self.role {
            Role::Student => "enrolledClasses",
            Role::Lecturer | Role::Admin => "assignedClasses",
        };
        self.details
            .get(key)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}

/// Login form input: identifier plus secret.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub nim: String,
    pub password: String,
}

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;
