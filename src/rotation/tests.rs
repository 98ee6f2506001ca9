use super::*;
use crate::testutil::{open_store, titles, track};
use std::thread;
use tempfile::tempdir;

fn engine_with(dir: &std::path::Path, group: &str, names: &[&str]) -> Rotation {
    let store = open_store(dir);
    store.register(group).unwrap();
    let rotation = Rotation::new(store);
    for n in names {
        rotation.append(group, track(n, "X")).unwrap();
    }
    rotation
}

#[test]
fn append_preserves_insertion_order() {
    let dir = tempdir().unwrap();
    let rotation = engine_with(dir.path(), "100", &["A", "B", "C"]);

    assert_eq!(titles(&rotation.list("100").unwrap()), vec!["A", "B", "C"]);
    assert_eq!(rotation.append("100", track("D", "Y")).unwrap(), 4);
    assert_eq!(rotation.peek_current("100").unwrap().unwrap().title(), "A");
}

#[test]
fn advance_moves_head_to_tail() {
    let dir = tempdir().unwrap();
    let rotation = engine_with(dir.path(), "100", &["A", "B", "C"]);

    let next = rotation.advance("100").unwrap().unwrap();
    assert_eq!(next.title(), "B");
    assert_eq!(titles(&rotation.list("100").unwrap()), vec!["B", "C", "A"]);
    assert_eq!(rotation.peek_current("100").unwrap().unwrap().title(), "B");
}

#[test]
fn n_advances_restore_the_original_order() {
    let dir = tempdir().unwrap();
    let names = ["A", "B", "C", "D", "E"];
    let rotation = engine_with(dir.path(), "100", &names);
    let original = rotation.list("100").unwrap();

    for _ in 0..names.len() {
        rotation.advance("100").unwrap();
    }

    assert_eq!(rotation.list("100").unwrap(), original);
    assert_eq!(rotation.peek_current("100").unwrap().as_ref(), original.first());
}

#[test]
fn single_and_empty_rotation_is_identity() {
    let dir = tempdir().unwrap();
    let rotation = engine_with(dir.path(), "100", &[]);

    assert_eq!(rotation.advance("100").unwrap(), None);
    assert_eq!(rotation.peek_current("100").unwrap(), None);
    assert!(rotation.list("100").unwrap().is_empty());

    rotation.append("100", track("A", "X")).unwrap();
    let head = rotation.advance("100").unwrap().unwrap();
    assert_eq!(head.title(), "A");
    assert_eq!(titles(&rotation.list("100").unwrap()), vec!["A"]);
}

#[test]
fn unregistered_group_is_distinct_from_empty_playlist() {
    let dir = tempdir().unwrap();
    let rotation = engine_with(dir.path(), "registered-but-empty", &[]);

    assert!(matches!(
        rotation.list("nonexistent"),
        Err(Error::UnknownGroup(g)) if g == "nonexistent"
    ));
    assert!(matches!(rotation.peek_current("nonexistent"), Err(Error::UnknownGroup(_))));
    assert!(matches!(rotation.advance("nonexistent"), Err(Error::UnknownGroup(_))));
    assert!(matches!(
        rotation.append("nonexistent", track("A", "X")),
        Err(Error::UnknownGroup(_))
    ));

    assert!(rotation.list("registered-but-empty").unwrap().is_empty());
    assert!(matches!(
        rotation.list_nonempty("registered-but-empty"),
        Err(Error::EmptyPlaylist(g)) if g == "registered-but-empty"
    ));
}

#[test]
fn append_never_creates_a_group() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path());
    let rotation = Rotation::new(store.clone());

    assert!(rotation.append("100", track("A", "X")).is_err());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn returned_lists_are_detached_snapshots() {
    let dir = tempdir().unwrap();
    let rotation = engine_with(dir.path(), "100", &["A", "B"]);

    let mut snapshot = rotation.list("100").unwrap();
    snapshot.reverse();
    snapshot.push(track("Z", "Z"));

    assert_eq!(titles(&rotation.list("100").unwrap()), vec!["A", "B"]);
}

#[test]
fn concurrent_append_and_advance_on_different_groups_both_apply() {
    let dir = tempdir().unwrap();
    let store = open_store(dir.path());
    store.register("A").unwrap();
    store.register("B").unwrap();
    let rotation = Rotation::new(store);
    rotation.append("B", track("b1", "X")).unwrap();
    rotation.append("B", track("b2", "X")).unwrap();

    let r1 = rotation.clone();
    let r2 = rotation.clone();
    let t1 = thread::spawn(move || r1.append("A", track("a1", "X")).unwrap());
    let t2 = thread::spawn(move || r2.advance("B").unwrap());
    t1.join().unwrap();
    t2.join().unwrap();

    assert_eq!(titles(&rotation.list("A").unwrap()), vec!["a1"]);
    assert_eq!(titles(&rotation.list("B").unwrap()), vec!["b2", "b1"]);
}

#[test]
fn concurrent_append_and_advance_on_same_group_lose_nothing() {
    for _ in 0..10 {
        let dir = tempdir().unwrap();
        let rotation = engine_with(dir.path(), "100", &["A", "B", "C"]);

        let r1 = rotation.clone();
        let r2 = rotation.clone();
        let t1 = thread::spawn(move || r1.append("100", track("N", "X")).unwrap());
        let t2 = thread::spawn(move || r2.advance("100").unwrap());
        t1.join().unwrap();
        t2.join().unwrap();

        let order = rotation.list("100").unwrap();
        let order = titles(&order);
        assert_eq!(order.len(), 4);
        // Rotation applied either before or after the append.
        assert!(
            order == vec!["B", "C", "A", "N"] || order == vec!["B", "C", "N", "A"],
            "unexpected order {order:?}"
        );
    }
}

#[test]
fn many_concurrent_appends_are_all_kept() {
    let dir = tempdir().unwrap();
    let rotation = engine_with(dir.path(), "100", &[]);

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let r = rotation.clone();
            thread::spawn(move || r.append("100", track(&format!("t{i:02}"), "X")).unwrap())
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let mut got: Vec<String> = rotation
        .list("100")
        .unwrap()
        .iter()
        .map(|t| t.title().to_string())
        .collect();
    got.sort();
    let want: Vec<String> = (0..20).map(|i| format!("t{i:02}")).collect();
    assert_eq!(got, want);
}
