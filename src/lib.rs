//! Session core for the NEPTUNE competitive-programming course platform.
//!
//! This crate owns the client-side authentication state machine: the
//! [`manager::SessionManager`] (login, logout, startup validation, token
//! refresh, periodic expiry watchdog), the persisted session record behind
//! the [`store::SessionStore`] seam, and the role-based
//! [`guard::RouteGuard`] checks the rendering shell consults before drawing
//! a page subtree. The backend sits behind the [`service::AuthService`]
//! trait; [`mock::MockAuthService`] is the development stand-in wired at
//! the composition root.

pub mod config;
pub mod guard;
pub mod manager;
pub mod mock;
pub mod route;
pub mod service;
pub mod session;
pub mod store;
pub mod token;
pub mod user;

pub use config::SessionConfig;
pub use guard::{GuardDecision, RouteGuard};
pub use manager::SessionManager;
pub use route::Route;
pub use service::{AuthError, AuthService, LoginResponse};
pub use session::{Session, SessionPhase};
pub use store::{MemoryStore, SessionStore};
pub use token::OpaqueTokenPolicy;
pub use user::{ClassRef, Credentials, Role, User};
