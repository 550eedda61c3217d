//! Merge tests
//!
//! Structural merges of snapshots into a live store: recursion into shared
//! sections, both policies, and idempotence.

use nestkv::{MergePolicy, MergeReport, Store, Value};

use crate::helpers::*;

fn defaults() -> nestkv::Snapshot {
    snapshot_of(&[
        ("server.host", Value::from("0.0.0.0")),
        ("server.port", Value::from(80)),
        ("server.tls.enabled", Value::from(true)),
        ("server.tls.cert", Value::from("/etc/cert.pem")),
        ("log.level", Value::from("info")),
    ])
}

#[test]
fn test_keep_fills_only_missing_keys() {
    let store = server_config();
    let report = store.merge(&defaults(), MergePolicy::Keep);

    assert_eq!(report, MergeReport { written: 2, kept: 3 });
    assert_eq!(store.get_string("server.host").as_deref(), Some("localhost"));
    assert_eq!(store.get_int("server.port"), 8080);
    assert!(!store.get_boolean("server.tls.enabled"));
    assert_eq!(store.get_string("server.tls.cert").as_deref(), Some("/etc/cert.pem"));
    assert_eq!(store.get_string("log.level").as_deref(), Some("info"));
    assert_keys(&store, "server.tls", &["enabled", "cert"]);
}

#[test]
fn test_overwrite_takes_source_values() {
    let store = server_config();
    let report = store.merge(&defaults(), MergePolicy::Overwrite);

    assert_eq!(report, MergeReport { written: 5, kept: 0 });
    assert_eq!(store.get_string("server.host").as_deref(), Some("0.0.0.0"));
    assert_eq!(store.get_int("server.port"), 80);
    assert!(store.get_boolean("server.tls.enabled"));
    // Keys only present in the target survive
    assert_eq!(store.get_string_list("features"), vec!["search", "export"]);
}

#[test]
fn test_merge_keeps_section_identity() {
    let store = server_config();
    let tls = store.section("server.tls").unwrap();

    store.merge(&defaults(), MergePolicy::Overwrite);
    assert!(store.section("server.tls").unwrap().ptr_eq(&tls));
    assert_eq!(tls.get("cert"), Some(Value::from("/etc/cert.pem")));
}

#[test]
fn test_merge_twice_is_idempotent() {
    for policy in [MergePolicy::Keep, MergePolicy::Overwrite] {
        let store = server_config();
        store.merge(&defaults(), policy);
        let once = store.snapshot();

        store.merge(&defaults(), policy);
        assert_eq!(store.snapshot(), once, "{policy:?}");
    }
}

#[test]
fn test_merge_into_empty_store_copies_everything() {
    let store = Store::new();
    let report = store.merge(&defaults(), MergePolicy::Keep);

    assert_eq!(report.written, 2);
    assert_eq!(store.snapshot(), defaults());
}

#[test]
fn test_merge_from_json_source() {
    let store = server_config();
    let source = nestkv::Snapshot::try_from(serde_json::json!({
        "server": { "port": 443, "tls": { "enabled": true } }
    }))
    .unwrap();

    store.merge(&source, MergePolicy::Overwrite);
    assert_eq!(store.get_int("server.port"), 443);
    assert!(store.get_boolean("server.tls.enabled"));
    assert_eq!(store.get_string("server.host").as_deref(), Some("localhost"));
}
