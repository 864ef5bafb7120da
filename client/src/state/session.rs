//! Session store: the authenticated user's record for this browser session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written only by the submission controller's login success path (and by
//! logout), read by route guards and user-aware screens. Injected through
//! Leptos context or constructed directly by native callers.
//!
//! CONSISTENCY
//! ===========
//! Durable storage is written before the in-memory mirror. If the durable
//! write fails the mirror is left as it was, so both views always agree.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, PoisonError, RwLock};

use crate::net::types::SessionRecord;
use crate::util::storage::{SessionStorage, StorageError};

/// Storage key the record is persisted under.
pub const SESSION_KEY: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("session encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Shared handle; clones observe the same session.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    key: String,
    current: Arc<RwLock<Option<SessionRecord>>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("key", &self.key)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Empty store over `storage`; anything already persisted is ignored.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        Self { storage, key: key.into(), current: Arc::new(RwLock::new(None)) }
    }

    /// Store over `storage`, seeded with any record persisted under `key`.
    ///
    /// Unreadable storage or a corrupt payload yields an empty store.
    #[must_use]
    pub fn restore(storage: Arc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        let store = Self::new(storage, key);
        let restored = match store.storage.load(&store.key) {
            Ok(Some(raw)) => match serde_json::from_str::<SessionRecord>(&raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("discarding unreadable session under {:?}: {e}", store.key);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("session storage not readable: {e}");
                None
            }
        };
        if restored.is_some() {
            log::info!("session restored from storage");
        }
        *store.current.write().unwrap_or_else(PoisonError::into_inner) = restored;
        store
    }

    /// Persist `record` and make it the current session.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the record could not be encoded or
    /// persisted; the current session is then unchanged.
    pub fn set(&self, record: SessionRecord) -> Result<(), SessionError> {
        let raw = serde_json::to_string(&record)?;
        self.storage.save(&self.key, &raw)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(record);
        Ok(())
    }

    /// The current session, if any.
    #[must_use]
    pub fn get(&self) -> Option<SessionRecord> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Remove the persisted record and end the session.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the persisted record could not be
    /// removed; the current session is then unchanged.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.storage.remove(&self.key)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
