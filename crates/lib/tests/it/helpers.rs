use nestkv::{Snapshot, Store, Value};

// ==========================
// STORE FACTORIES
// ==========================

/// Creates a store pre-populated with `pairs`.
pub fn store_with(pairs: &[(&str, Value)]) -> Store {
    let store = Store::new();
    for (key, value) in pairs {
        store.set(*key, value.clone());
    }
    store
}

/// A small application-style configuration used across test modules.
pub fn server_config() -> Store {
    store_with(&[
        ("server.host", Value::from("localhost")),
        ("server.port", Value::from(8080)),
        ("server.tls.enabled", Value::from(false)),
        ("features", Value::from(vec!["search", "export"])),
        ("limits.ratio", Value::from(0.25)),
    ])
}

/// Builds a snapshot from dotted `pairs` by going through a scratch store.
pub fn snapshot_of(pairs: &[(&str, Value)]) -> Snapshot {
    store_with(pairs).snapshot()
}

// ==========================
// ASSERTION HELPERS
// ==========================

/// Asserts that the section at `key` has exactly `expected` as direct keys.
pub fn assert_keys(store: &Store, key: &str, expected: &[&str]) {
    let mut expected: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
    expected.sort();
    assert_eq!(store.keys(key), expected, "keys of '{key}'");
}

/// Asserts that two stores hold the same content.
pub fn assert_same_content(left: &Store, right: &Store) {
    assert_eq!(left.snapshot(), right.snapshot());
}
