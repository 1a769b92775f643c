use super::*;

#[test]
fn get_returns_none_for_absent_key() {
    let store = MemoryStore::new();
    assert!(store.get("missing").expect("get").is_none());
}

#[test]
fn set_then_get_round_trips() {
    let mut store = MemoryStore::new();
    store.set("k", "v").expect("set");
    assert_eq!(store.get("k").expect("get").as_deref(), Some("v"));
}

#[test]
fn set_replaces_previous_value() {
    let mut store = MemoryStore::new();
    store.set("k", "old").expect("set");
    store.set("k", "new").expect("set");
    assert_eq!(store.get("k").expect("get").as_deref(), Some("new"));
}

#[test]
fn remove_is_idempotent() {
    let mut store = MemoryStore::new();
    store.set("k", "v").expect("set");
    store.remove("k").expect("remove");
    store.remove("k").expect("remove absent");
    assert!(store.is_empty());
}

#[test]
fn clones_share_the_same_map() {
    let store = MemoryStore::new();
    let mut handle = store.clone();
    handle.set("k", "v").expect("set");
    assert!(store.contains("k"));
    assert_eq!(store.len(), 1);
}

#[test]
fn fail_removes_rejects_remove_without_mutating() {
    let mut store = MemoryStore::new();
    store.set("k", "v").expect("set");
    store.fail_removes(true);
    assert!(matches!(store.remove("k"), Err(StoreError::Remove { .. })));
    assert!(store.contains("k"));
}

#[test]
fn fail_writes_rejects_set_without_mutating() {
    let mut store = MemoryStore::new();
    store.fail_writes(true);
    assert!(matches!(store.set("k", "v"), Err(StoreError::Write { .. })));
    assert!(!store.contains("k"));

    store.fail_writes(false);
    store.set("k", "v").expect("set after recovery");
    assert!(store.contains("k"));
}
