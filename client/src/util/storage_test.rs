use super::*;

#[test]
fn memory_storage_saves_loads_and_removes() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.load("user").unwrap(), None);

    storage.save("user", r#"{"token":"abc"}"#).unwrap();
    assert_eq!(storage.load("user").unwrap().as_deref(), Some(r#"{"token":"abc"}"#));

    storage.remove("user").unwrap();
    assert_eq!(storage.load("user").unwrap(), None);
}

#[test]
fn memory_storage_overwrites_existing_key() {
    let storage = MemoryStorage::new();
    storage.save("user", "a").unwrap();
    storage.save("user", "b").unwrap();
    assert_eq!(storage.load("user").unwrap().as_deref(), Some("b"));
}

#[test]
fn memory_storage_remove_missing_key_is_ok() {
    assert!(MemoryStorage::new().remove("absent").is_ok());
}

#[cfg(not(feature = "csr"))]
#[test]
fn local_storage_is_unavailable_natively() {
    assert!(matches!(LocalStorage.load("user"), Err(StorageError::Unavailable)));
    assert!(matches!(LocalStorage.save("user", "{}"), Err(StorageError::Unavailable)));
}
