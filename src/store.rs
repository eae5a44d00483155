//! Persisted session record.
//!
//! DESIGN
//! ======
//! The browser persists the session under three local-storage keys: the raw
//! token, the serialized user, and an authentication flag. The trio is
//! always written and cleared together; a partial record (flag without a
//! parseable user, user without a token) is treated as "not authenticated"
//! and swept on read so it cannot keep confusing later loads.
//!
//! The [`SessionStore`] trait stands in for `window.localStorage` so tests
//! and non-browser hosts can substitute an in-memory map. Only the session
//! manager writes through it; guards and UI read session state from the
//! manager, never from storage directly.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::user::User;

/// Storage key for the bearer token.
pub const KEY_TOKEN: &str = "token";
/// Storage key for the serialized [`User`].
pub const KEY_USER: &str = "user";
/// Storage key for the authentication flag (`"true"` when set).
pub const KEY_AUTHENTICATED: &str = "isAuthenticated";

/// String key-value store with local-storage semantics.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory [`SessionStore`] for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .map_or(None, |entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// A consistent persisted session read back from storage.
#[derive(Clone, Debug)]
pub struct PersistedSession {
    pub token: String,
    pub user: User,
}

/// Write the full session record. The three keys land together.
pub fn persist_session(store: &dyn SessionStore, token: &str, user: &User) {
    let serialized = serde_json::to_string(user).unwrap_or_default();
    store.set(KEY_TOKEN, token);
    store.set(KEY_USER, &serialized);
    store.set(KEY_AUTHENTICATED, "true");
}

/// Replace only the token, keeping the rest of the record. Used by refresh,
/// where the user and flag are already consistent.
pub fn set_token(store: &dyn SessionStore, token: &str) {
    store.set(KEY_TOKEN, token);
}

/// Remove the full session record. Safe to call when nothing is stored.
pub fn clear_session(store: &dyn SessionStore) {
    store.remove(KEY_TOKEN);
    store.remove(KEY_USER);
    store.remove(KEY_AUTHENTICATED);
}

/// Read the persisted record, enforcing the consistency invariant.
///
/// Returns `Some` only when the authentication flag is set and both a token
/// and a parseable user are present. Any violation clears the leftovers and
/// reads as `None`.
pub fn load_session(store: &dyn SessionStore) -> Option<PersistedSession> {
    let flagged = store
        .get(KEY_AUTHENTICATED)
        .is_some_and(|flag| flag == "true");
    if !flagged {
        return None;
    }

    let token = store.get(KEY_TOKEN);
    let user = store
        .get(KEY_USER)
        .and_then(|raw| serde_json::from_str::<User>(&raw).ok());

    match (token, user) {
        (Some(token), Some(user)) if !token.is_empty() => Some(PersistedSession { token, user }),
        _ => {
            // Partial record: sweep it so it cannot masquerade as a session.
            clear_session(store);
            None
        }
    }
}

/// Read just the stored token, if any.
#[must_use]
pub fn stored_token(store: &dyn SessionStore) -> Option<String> {
    store.get(KEY_TOKEN).filter(|t| !t.is_empty())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
