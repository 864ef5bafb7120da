use super::*;
use crate::util::storage::MemoryStorage;

// =============================================================
// Helpers
// =============================================================

/// Storage whose writes always fail; reads return `seed`.
struct ReadOnlyStorage {
    seed: Option<String>,
}

impl SessionStorage for ReadOnlyStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.seed.clone())
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("quota exceeded".to_owned()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("quota exceeded".to_owned()))
    }
}

fn record(token: &str) -> SessionRecord {
    SessionRecord::new(serde_json::json!({ "token": token }))
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn new_store_starts_empty() {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()), SESSION_KEY);
    assert!(!store.is_authenticated());
    assert_eq!(store.get(), None);
}

#[test]
fn set_persists_and_mirrors() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::new(storage.clone(), SESSION_KEY);

    store.set(record("abc")).unwrap();

    assert_eq!(store.get(), Some(record("abc")));
    assert_eq!(storage.load(SESSION_KEY).unwrap().as_deref(), Some(r#"{"token":"abc"}"#));
}

#[test]
fn clones_share_the_session() {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()), SESSION_KEY);
    let reader = store.clone();
    store.set(record("abc")).unwrap();
    assert!(reader.is_authenticated());
}

#[test]
fn clear_removes_both_views() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::new(storage.clone(), SESSION_KEY);
    store.set(record("abc")).unwrap();

    store.clear().unwrap();

    assert_eq!(store.get(), None);
    assert_eq!(storage.load(SESSION_KEY).unwrap(), None);
}

#[test]
fn restore_recovers_persisted_record() {
    let storage = Arc::new(MemoryStorage::new());
    SessionStore::new(storage.clone(), SESSION_KEY).set(record("abc")).unwrap();

    let restored = SessionStore::restore(storage, SESSION_KEY);
    assert_eq!(restored.get().and_then(|r| r.token().map(str::to_owned)), Some("abc".to_owned()));
}

#[test]
fn restore_discards_corrupt_payload() {
    let storage = Arc::new(MemoryStorage::new());
    storage.save(SESSION_KEY, "{not json").unwrap();
    let restored = SessionStore::restore(storage, SESSION_KEY);
    assert!(!restored.is_authenticated());
}

// =============================================================
// Partial failure
// =============================================================

#[test]
fn failed_durable_write_leaves_mirror_untouched() {
    let store = SessionStore::new(Arc::new(ReadOnlyStorage { seed: None }), SESSION_KEY);
    let err = store.set(record("abc")).unwrap_err();
    assert!(matches!(err, SessionError::Storage(StorageError::Io(_))));
    assert!(!store.is_authenticated());
}

#[test]
fn failed_durable_remove_keeps_session() {
    let storage = Arc::new(ReadOnlyStorage { seed: Some(r#"{"token":"abc"}"#.to_owned()) });
    let store = SessionStore::restore(storage, SESSION_KEY);
    assert!(store.is_authenticated());

    assert!(store.clear().is_err());
    assert!(store.is_authenticated());
}
