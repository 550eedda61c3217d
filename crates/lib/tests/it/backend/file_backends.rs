//! JSON and YAML file backend tests.

use nestkv::{JsonFile, Store};
#[cfg(feature = "yaml")]
use nestkv::{Backend, YamlFile};

use crate::helpers::*;

#[test]
fn test_json_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let backend = JsonFile::new(dir.path().join("app.json"));

    let store = server_config();
    assert!(store.save(&backend));

    let restored = Store::new();
    assert!(restored.load(&backend));
    assert_same_content(&store, &restored);
    assert_eq!(restored.get_double("limits.ratio"), 0.25);
}

#[cfg(feature = "yaml")]
#[test]
fn test_yaml_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let backend = YamlFile::new(dir.path().join("app.yml"));

    let store = server_config();
    assert!(store.save(&backend));

    let restored = Store::new();
    assert!(restored.load(&backend));
    assert_same_content(&store, &restored);
}

#[test]
fn test_first_load_creates_file_and_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf/app.json");
    let backend = JsonFile::new(&path);

    let store = server_config();
    assert!(store.load(&backend));
    assert!(path.exists());
    assert_eq!(store.get_int("server.port"), 8080);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a/b/c/app.json");
    let store = server_config();

    assert!(store.save(&JsonFile::new(&path)));
    assert!(path.exists());
}

#[test]
fn test_corrupt_file_load_fails_without_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.json");
    std::fs::write(&path, "{\"server\": ").unwrap();

    let store = server_config();
    let before = store.snapshot();
    assert!(!store.load(&JsonFile::new(&path)));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_save_replaces_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.json");
    let backend = JsonFile::new(&path).with_pretty(false);

    server_config().save(&backend);
    let small = Store::new();
    small.set("only", 1);
    assert!(small.save(&backend));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"only":1}"#);
    // No temporary files are left next to the target
    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[cfg(feature = "yaml")]
#[test]
fn test_external_edit_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.yml");
    std::fs::write(&path, "server:\n  port: 9000\n  host: example.org\n").unwrap();

    let backend = YamlFile::new(&path);
    let snapshot = backend.read().unwrap().unwrap();
    assert_eq!(snapshot.get_int("server.port"), 9000);

    let store = Store::new();
    assert!(store.load(&backend));
    assert_keys(&store, "server", &["port", "host"]);
}

#[cfg(feature = "yaml")]
#[test]
fn test_yaml_numeric_keys_load_as_strings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ports.yml");
    std::fs::write(&path, "ports:\n  80: http\n  443: https\n").unwrap();

    let store = Store::new();
    assert!(store.load(&YamlFile::new(&path)));
    assert_eq!(store.get_string("ports.80").as_deref(), Some("http"));
    assert_eq!(store.get_string("ports.443").as_deref(), Some("https"));
    assert_keys(&store, "ports", &["443", "80"]);
}
