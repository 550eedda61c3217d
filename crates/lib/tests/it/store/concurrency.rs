//! Concurrent access tests
//!
//! Parallel writers on disjoint keys must not lose updates, and writers racing
//! to create the same intermediate section must end up sharing one section.

use std::{sync::Arc, thread};

use nestkv::{Store, Value};

const THREADS: usize = 8;
const KEYS_PER_THREAD: usize = 200;

#[test]
fn test_disjoint_writers_lose_nothing() {
    let store = Arc::new(Store::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..KEYS_PER_THREAD {
                    store.set(format!("worker{t}.key{i}"), i as i64);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), THREADS);
    for t in 0..THREADS {
        let prefix = format!("worker{t}");
        assert_eq!(store.keys(&prefix).len(), KEYS_PER_THREAD);
        for i in 0..KEYS_PER_THREAD {
            assert_eq!(store.get_long(format!("{prefix}.key{i}")), i as i64);
        }
    }
}

#[test]
fn test_shared_prefix_lands_in_one_section() {
    // Repeat to give the race on "a" and "a.b" a fair chance to happen
    for _ in 0..50 {
        let store = Store::new();
        thread::scope(|s| {
            for t in 0..THREADS {
                let store = &store;
                s.spawn(move || store.set(format!("a.b.x{t}"), t as i64));
            }
        });

        let expected: Vec<String> = {
            let mut keys: Vec<String> = (0..THREADS).map(|t| format!("x{t}")).collect();
            keys.sort();
            keys
        };
        assert_eq!(store.keys("a.b"), expected);
        assert_eq!(store.keys("a"), vec!["b"]);
    }
}

#[test]
fn test_two_writers_same_parent() {
    for _ in 0..100 {
        let store = Store::new();
        thread::scope(|s| {
            s.spawn(|| store.set("a.b.x", 1));
            s.spawn(|| store.set("a.b.y", 2));
        });

        let b = store.section("a.b").unwrap();
        assert_eq!(b.get("x"), Some(Value::Int(1)));
        assert_eq!(b.get("y"), Some(Value::Int(2)));
    }
}

#[test]
fn test_readers_see_whole_values() {
    let store = Store::new();
    store.set("shared", "initial");

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..1000 {
                store.set("shared", format!("value-{i}"));
            }
        });
        s.spawn(|| {
            for _ in 0..1000 {
                let seen = store.get_string("shared").unwrap();
                assert!(seen == "initial" || seen.starts_with("value-"), "torn read: {seen}");
            }
        });
    });
}

#[test]
fn test_snapshot_during_writes_is_stable() {
    let store = Store::new();
    for i in 0..100 {
        store.set(format!("items.k{i}"), i);
    }

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..100 {
                store.set(format!("items.k{i}"), -1);
            }
        });
        s.spawn(|| {
            let snapshot = store.snapshot();
            let items = snapshot.section("items").unwrap();
            assert_eq!(items.len(), 100);
            for i in 0..100 {
                let seen = items.get_long(format!("k{i}"));
                assert!(seen == i || seen == -1, "k{i} = {seen}");
            }
        });
    });
}
