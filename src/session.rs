//! Session repository
//!
//! Explicit get/set/clear interface over the logged-in user record, replacing
//! the ambient browser storage the product demo leans on. The flow loads the
//! session once at start, writes it on login, and clears it on logout.

use crate::models::User;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Fixed storage key for the user record.
pub const SESSION_KEY: &str = "idyn-user";

/// Errors that can occur in a session repository.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session store lock poisoned")]
    Poisoned,
}

/// Storage interface for the logged-in user record.
///
/// Implementations can sit on any key-value backend; the demo ships an
/// in-memory one that mirrors per-tab browser session storage.
pub trait SessionStore: Send + Sync {
    /// Fetch the current user, if any.
    fn get(&self) -> Result<Option<User>, SessionError>;

    /// Record the user as logged in.
    fn set(&self, user: &User) -> Result<(), SessionError>;

    /// Drop the session record, if present.
    fn clear(&self) -> Result<(), SessionError>;
}

/// In-memory session store keyed like the browser original.
///
/// Values are stored as JSON strings so a corrupt record is an observable
/// state, not a type-system impossibility: corruption is logged, the entry is
/// dropped, and the caller sees "not logged in".
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        MemorySessionStore {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<User>, SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;

        let blob = match entries.get(SESSION_KEY) {
            Some(blob) => blob.clone(),
            None => return Ok(None),
        };

        match serde_json::from_str::<User>(&blob) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                log::warn!("Discarding corrupt session record: {}", e);
                entries.remove(SESSION_KEY);
                Ok(None)
            }
        }
    }

    fn set(&self, user: &User) -> Result<(), SessionError> {
        let blob = serde_json::to_string(user)?;
        let mut entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        entries.insert(SESSION_KEY.to_string(), blob);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        entries.remove(SESSION_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_no_user() {
        let store = MemorySessionStore::new();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let store = MemorySessionStore::new();
        let user = User::new("Verified User", "rP9jPy123");

        store.set(&user).unwrap();
        assert_eq!(store.get().unwrap(), Some(user));
    }

    #[test]
    fn test_clear_removes_session() {
        let store = MemorySessionStore::new();
        store.set(&User::new("Verified User", "rP9jPy123")).unwrap();

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn test_overwrite_keeps_latest_user() {
        let store = MemorySessionStore::new();
        store.set(&User::new("First", "wallet-1")).unwrap();
        store.set(&User::new("Second", "wallet-2")).unwrap();

        let user = store.get().unwrap().unwrap();
        assert_eq!(user.name, "Second");
        assert_eq!(user.wallet, "wallet-2");
    }

    #[test]
    fn test_corrupt_record_is_dropped() {
        let store = MemorySessionStore::new();
        store
            .entries
            .lock()
            .unwrap()
            .insert(SESSION_KEY.to_string(), "{not json".to_string());

        // First read recovers by discarding the record.
        assert!(store.get().unwrap().is_none());

        // The broken entry is gone, not merely ignored.
        assert!(store.entries.lock().unwrap().get(SESSION_KEY).is_none());
    }
}
