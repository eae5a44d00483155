//! Session manager — single source of truth for the authenticated identity.
//!
//! ARCHITECTURE
//! ============
//! The manager owns the in-memory [`Session`] and the persisted record, and
//! is the only writer of either. Consumers observe state through a `watch`
//! channel and receive navigation side effects (post-login redirects,
//! logout bounces) over an unbounded mpsc, so the rendering shell stays a
//! pure consumer. The auth backend and the storage layer are injected as
//! trait objects at the composition root.
//!
//! ORDERING
//! ========
//! Async operations can overlap: a logout can be issued while a login is
//! still in flight. Every operation takes a generation number at invocation
//! and commits its result (state, storage, navigation) only if no newer
//! operation has started since. Later invocations win; stale completions
//! are discarded.
//!
//! ERROR HANDLING
//! ==============
//! Failures never leave the machine ambiguous: every operation resolves to
//! `authenticated` or `unauthenticated` with `loading` cleared. Errors are
//! stored for display and also returned, so a caller that awaits the
//! operation (a login form, say) can react without re-reading shared state.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::route::Route;
use crate::service::{AuthError, AuthService, LoginResponse};
use crate::session::Session;
use crate::store::{self, SessionStore};
use crate::token::{is_token_valid, unix_now};
use crate::user::{Credentials, User};

struct Inner {
    service: Arc<dyn AuthService>,
    store: Arc<dyn SessionStore>,
    config: SessionConfig,
    state: watch::Sender<Session>,
    /// Monotonic operation counter. A completion applies only while its
    /// generation is still current.
    generation: AtomicU64,
    nav_tx: mpsc::UnboundedSender<Route>,
    nav_rx: Mutex<Option<mpsc::UnboundedReceiver<Route>>>,
    watchdog: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn begin_op(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, op: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == op
    }

    fn update(&self, f: impl FnOnce(&mut Session)) {
        self.state.send_modify(f);
    }

    fn navigate(&self, route: Route) {
        // The shell may not have attached a receiver yet; navigation is
        // advisory, not load-bearing.
        let _ = self.nav_tx.send(route);
    }

    fn stop_watchdog(&self) {
        if let Ok(mut slot) = self.watchdog.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }

    fn token_is_valid_now(&self, token: &str) -> bool {
        is_token_valid(token, unix_now(), self.config.opaque_token_policy)
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.watchdog.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

/// Owner of authentication state: login/logout/validate/refresh plus the
/// periodic expiry watchdog. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

impl SessionManager {
    /// Build a manager over the given backend and storage. The initial
    /// state is `loading`; call [`Self::validate_auth`] once at startup to
    /// settle it.
    #[must_use]
    pub fn new(
        service: Arc<dyn AuthService>,
        store: Arc<dyn SessionStore>,
        config: SessionConfig,
    ) -> Self {
        let (state, _) = watch::channel(Session::default());
        let (nav_tx, nav_rx) = mpsc::unbounded_channel();
        Self {
            inner: Arc::new(Inner {
                service,
                store,
                config,
                state,
                generation: AtomicU64::new(0),
                nav_tx,
                nav_rx: Mutex::new(Some(nav_rx)),
                watchdog: Mutex::new(None),
            }),
        }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Watch receiver for session snapshots. Guards re-evaluate on change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Take the navigation event stream. Yields `Some` on the first call
    /// only; the shell is the single consumer.
    #[must_use]
    pub fn take_navigations(&self) -> Option<mpsc::UnboundedReceiver<Route>> {
        self.inner.nav_rx.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Exchange credentials for a session. On success the token, user, and
    /// flag are persisted together, the state flips to authenticated, and
    /// the role's home route is emitted. On failure the message is stored
    /// and the error re-raised. `loading` clears on every path.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let inner = &self.inner;
        let op = inner.begin_op();
        inner.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match inner.service.login(credentials).await {
            Ok(LoginResponse { user, token }) => {
                if inner.is_current(op) {
                    store::persist_session(inner.store.as_ref(), &token, &user);
                    let committed = user.clone();
                    inner.update(move |s| {
                        s.user = Some(committed);
                        s.is_authenticated = true;
                        s.error = None;
                        s.loading = false;
                    });
                    inner.navigate(user.role.home_route());
                    spawn_watchdog(inner);
                    info!(nim = %user.nim, role = %user.role, "login succeeded");
                } else {
                    info!(nim = %user.nim, "discarding stale login completion");
                }
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                if inner.is_current(op) {
                    let message = err.to_string();
                    inner.update(move |s| {
                        s.error = Some(message);
                        s.loading = false;
                    });
                }
                Err(err)
            }
        }
    }

    /// Clear the session. The backend is notified best-effort; the local
    /// record and state are cleared regardless, and the login route is
    /// emitted. Idempotent: a second call repeats the clear without error.
    pub async fn logout(&self) {
        let inner = &self.inner;
        let op = inner.begin_op();
        inner.stop_watchdog();

        let was_authenticated = inner.state.borrow().is_authenticated;
        if was_authenticated {
            if let Some(token) = store::stored_token(inner.store.as_ref()) {
                if let Err(err) = inner.service.logout(&token).await {
                    warn!(error = %err, "logout notification failed");
                }
            }
        }

        if inner.is_current(op) {
            store::clear_session(inner.store.as_ref());
            inner.update(|s| {
                s.user = None;
                s.is_authenticated = false;
                s.error = None;
                s.loading = false;
            });
            inner.navigate(Route::Login);
            info!("session cleared");
        }
    }

    /// Settle the session from the persisted record: check token presence
    /// and validity, then fetch and re-persist the profile. Any failure
    /// clears the session and records why. `loading` is false on every
    /// exit, including the empty-store fast path.
    pub async fn validate_auth(&self) -> Result<User, AuthError> {
        let inner = &self.inner;
        let op = inner.begin_op();
        inner.update(|s| {
            s.loading = true;
            s.error = None;
        });

        let token = match store::stored_token(inner.store.as_ref()) {
            Some(token) if inner.token_is_valid_now(&token) => token,
            Some(_) => return self.fail_validation(op, AuthError::InvalidToken),
            None => return self.fail_validation(op, AuthError::MissingToken),
        };

        match inner.service.get_profile(&token).await {
            Ok(user) => {
                if inner.is_current(op) {
                    store::persist_session(inner.store.as_ref(), &token, &user);
                    let committed = user.clone();
                    inner.update(move |s| {
                        s.user = Some(committed);
                        s.is_authenticated = true;
                        s.error = None;
                        s.loading = false;
                    });
                    spawn_watchdog(inner);
                    info!(nim = %user.nim, role = %user.role, "session restored");
                }
                Ok(user)
            }
            Err(err) => self.fail_validation(op, err),
        }
    }

    fn fail_validation(&self, op: u64, err: AuthError) -> Result<User, AuthError> {
        let inner = &self.inner;
        warn!(error = %err, "validation failed");
        if inner.is_current(op) {
            inner.stop_watchdog();
            store::clear_session(inner.store.as_ref());
            let message = err.to_string();
            inner.update(move |s| {
                s.user = None;
                s.is_authenticated = false;
                s.error = Some(message);
                s.loading = false;
            });
            inner.navigate(Route::Login);
        }
        Err(err)
    }

    /// Replace the stored token with a fresh one. On failure the session is
    /// logged out and the error re-raised so the caller can react.
    pub async fn refresh_token(&self) -> Result<String, AuthError> {
        let inner = &self.inner;
        let op = inner.begin_op();

        let Some(token) = store::stored_token(inner.store.as_ref()) else {
            self.logout().await;
            return Err(AuthError::MissingToken);
        };

        match inner.service.refresh_token(&token).await {
            Ok(fresh) => {
                if inner.is_current(op) {
                    store::set_token(inner.store.as_ref(), &fresh);
                    info!("token refreshed");
                }
                Ok(fresh)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed");
                self.logout().await;
                Err(err)
            }
        }
    }

    /// Reset the stored error, e.g. before re-submitting a login form.
    pub fn clear_error(&self) {
        self.inner.update(|s| s.error = None);
    }
}

/// Spawn the periodic expiry watchdog for an authenticated session.
///
/// The task holds only a weak reference, so dropping the last manager
/// handle tears it down; it also exits when the session leaves
/// `authenticated` or when the token it guards expires (after logging the
/// session out). Restarting replaces and aborts any previous task.
fn spawn_watchdog(inner: &Arc<Inner>) {
    let weak = Arc::downgrade(inner);
    let interval = inner.config.check_interval;

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; the session was validated
        // moments ago, so skip it.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let Some(inner) = weak.upgrade() else { break };
            if !inner.state.borrow().is_authenticated {
                break;
            }
            let still_valid = store::stored_token(inner.store.as_ref())
                .is_some_and(|token| inner.token_is_valid_now(&token));
            if !still_valid {
                warn!("stored token expired; logging out");
                // Drop our own handle from the slot first: the logout path
                // aborts whatever handle it finds there, and that must not
                // be the task running the logout.
                if let Ok(mut slot) = inner.watchdog.lock() {
                    slot.take();
                }
                SessionManager { inner }.logout().await;
                break;
            }
        }
    });

    if let Ok(mut slot) = inner.watchdog.lock() {
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
