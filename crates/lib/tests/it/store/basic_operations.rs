//! Basic store operation tests
//!
//! Round trips through dotted keys, subtree removal, structural conflicts and
//! the end-to-end configuration flow.

use nestkv::{Section, Snapshot, Store, Value, key};

use crate::helpers::*;

#[test]
fn test_set_then_get_returns_value() {
    let store = Store::new();
    let cases = [
        ("flag", Value::from(true)),
        ("a.b.c", Value::from(42)),
        ("a.b.d", Value::from("text")),
        ("deep.x.y.z.w", Value::from(1.5)),
        ("list", Value::from(vec![1, 2, 3])),
        ("nothing", Value::Null),
    ];
    for (key, value) in &cases {
        store.set(*key, value.clone());
    }
    for (key, value) in &cases {
        assert_eq!(store.get(*key).as_ref(), Some(value), "key '{key}'");
    }
}

#[test]
fn test_null_is_stored_not_absent() {
    let store = Store::new();
    store.set("a", Value::Null);
    assert!(store.contains("a"));
    assert_eq!(store.get("a"), Some(Value::Null));
    assert_eq!(store.get_string("a"), None);
}

#[test]
fn test_server_config_end_to_end() {
    let store = Store::new();
    store.set("server.port", 8080);
    store.set("server.host", "localhost");

    assert_eq!(store.get_int("server.port"), 8080);
    assert_eq!(store.get_string("server.host").as_deref(), Some("localhost"));
    assert_keys(&store, "server", &["port", "host"]);
    assert_eq!(store.root_keys(), vec!["server"]);
}

#[test]
fn test_scalar_replaced_by_section() {
    let store = Store::new();
    store.set("a.b", 5);
    store.set("a.b.c", 1);

    let b = store.get("a.b").and_then(Value::into_section).unwrap();
    assert_eq!(b.keys(), vec!["c"]);
    assert_eq!(b.get("c"), Some(Value::Int(1)));
}

#[test]
fn test_section_replaced_by_scalar() {
    let store = Store::new();
    store.set("a.b.c", 1);
    store.set("a.b", "flat");

    assert_eq!(store.get_string("a.b").as_deref(), Some("flat"));
    assert!(store.get("a.b.c").is_none());
}

#[test]
fn test_remove_drops_whole_subtree() {
    let store = server_config();
    let removed = store.remove("server").unwrap();

    assert!(removed.is_section());
    assert!(!store.contains("server"));
    assert!(store.get("server.tls.enabled").is_none());
    assert!(store.keys("server").is_empty());
    assert_eq!(store.root_keys(), vec!["features", "limits"]);
}

#[test]
fn test_remove_leaf_keeps_siblings() {
    let store = server_config();
    assert_eq!(store.remove("server.port"), Some(Value::Int(8080)));
    assert_keys(&store, "server", &["host", "tls"]);
    assert!(store.remove("server.port").is_none());
}

#[test]
fn test_clear_detaches_sections() {
    let store = server_config();
    let server = store.section("server").unwrap();

    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(server.get("port"), Some(Value::Int(8080)));
    assert!(store.get("server.port").is_none());
}

#[test]
fn test_section_handles_are_live() {
    let store = Store::new();
    store.set("db.user", "admin");

    let db = store.section("db").unwrap();
    db.insert("password", "secret");
    store.set("db.port", 5432);

    assert_eq!(store.get_string("db.password").as_deref(), Some("secret"));
    assert_eq!(db.get("port"), Some(Value::Int(5432)));
}

#[test]
fn test_inserting_section_value() {
    let store = Store::new();
    let section = Section::new();
    section.insert("x", 1);
    store.set("mounted", section.clone());

    assert!(store.section("mounted").unwrap().ptr_eq(&section));
    assert_eq!(store.get_int("mounted.x"), 1);
}

#[test]
fn test_section_set_in_two_places_is_shared() {
    let store = Store::new();
    store.set("x.k", 1);
    store.set("y", store.section("x").unwrap());

    store.set("x.k", 2);
    assert_eq!(store.get_int("y.k"), 2);

    // A copy taken through a snapshot is independent
    store.set("z", Snapshot::of(&store.section("x").unwrap()).to_section());
    store.set("x.k", 3);
    assert_eq!(store.get_int("y.k"), 3);
    assert_eq!(store.get_int("z.k"), 2);
}

#[test]
fn test_formatting_self_containing_store_terminates() {
    let store = Store::new();
    store.set("a.x", 1);
    store.set("a.self", store.section("a").unwrap());

    let debug = format!("{store:?}");
    assert!(debug.contains("\"x\""));

    let display = Value::Section(store.section("a").unwrap()).to_string();
    assert_eq!(display, r#"{"self":null,"x":1}"#);
}

#[test]
fn test_key_builder_keys() {
    let store = Store::new();
    let port = key!("server", "http", "port");
    store.set(&port, 80);

    assert_eq!(store.get_int("server.http.port"), 80);
    assert_eq!(store.get_int(port.parent().unwrap().child("port")), 80);
    assert_eq!(store.get_int(key!("server", "http").join(&key!("port"))), 80);
}

#[test]
fn test_isolated_stores() {
    let first = Store::new();
    let second = Store::new();
    first.set("a", 1);

    assert!(second.is_empty());
    assert!(!second.contains("a"));
}

#[test]
fn test_snapshot_round_trip_into_new_store() {
    let store = server_config();
    let copy = Store::from_snapshot(&store.snapshot());
    assert_same_content(&store, &copy);
}
