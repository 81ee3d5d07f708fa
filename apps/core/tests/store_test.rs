use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;

use palette_core::store::{KeyValueStore, MemoryStore, SqliteStore, USAGE_KEY};

fn exercise_store(store: &dyn KeyValueStore) {
    assert_eq!(store.get(USAGE_KEY).unwrap(), None);

    store.set(USAGE_KEY, json!({ "New Tab": 1 })).unwrap();
    assert_eq!(store.get(USAGE_KEY).unwrap(), Some(json!({ "New Tab": 1 })));

    store.set(USAGE_KEY, json!({ "New Tab": 2 })).unwrap();
    assert_eq!(store.get(USAGE_KEY).unwrap(), Some(json!({ "New Tab": 2 })));
}

#[test]
fn memory_store_gets_and_sets() {
    exercise_store(&MemoryStore::new());
}

#[test]
fn sqlite_store_gets_and_sets() {
    exercise_store(&SqliteStore::open_memory().unwrap());
}

#[test]
fn sqlite_store_persists_across_reopens() {
    let dir = std::env::temp_dir().join(format!(
        "palette-store-test-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let path = dir.join("kv.sqlite3");

    {
        let store = SqliteStore::open(&path).unwrap();
        store.set("agents", json!([{ "id": "a1" }])).unwrap();
    }

    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("agents").unwrap(),
        Some(json!([{ "id": "a1" }]))
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn change_listener_fires_for_its_key_only() {
    let store = MemoryStore::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let sink = hits.clone();
    store.on_change(
        "agents",
        Arc::new(move |key| {
            assert_eq!(key, "agents");
            sink.fetch_add(1, Ordering::SeqCst);
        }),
    );

    store.set("agents", json!([])).unwrap();
    store.set(USAGE_KEY, json!({})).unwrap();
    store.set("agents", json!([1])).unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn sqlite_change_listener_fires_after_set() {
    let store = SqliteStore::open_memory().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let sink = hits.clone();
    store.on_change(USAGE_KEY, Arc::new(move |_key| {
        sink.fetch_add(1, Ordering::SeqCst);
    }));

    store.set(USAGE_KEY, json!({ "New Tab": 1 })).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
