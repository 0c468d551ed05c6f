use super::*;

#[test]
fn missing_key_loads_none() {
    let store = MemoryStore::new();
    assert_eq!(store.load("preferred-theme"), Ok(None));
}

#[test]
fn save_then_load_returns_value() {
    let store = MemoryStore::new();
    store.save("preferred-theme", "dark").unwrap();
    assert_eq!(store.load("preferred-theme"), Ok(Some("dark".to_owned())));
}

#[test]
fn clones_share_contents() {
    let store = MemoryStore::new();
    let other = store.clone();
    other.save("k", "v").unwrap();
    assert_eq!(store.get("k").as_deref(), Some("v"));
}

#[test]
fn seeded_store_has_entry() {
    let store = MemoryStore::with("preferred-theme", "light");
    assert_eq!(store.get("preferred-theme").as_deref(), Some("light"));
}

#[test]
fn unavailable_store_fails_both_ways() {
    let store = MemoryStore::unavailable();
    assert_eq!(store.load("k"), Err(StorageError::Unavailable));
    assert_eq!(store.save("k", "v"), Err(StorageError::Unavailable));
    assert_eq!(StorageError::Unavailable.to_string(), "storage unavailable");
}
