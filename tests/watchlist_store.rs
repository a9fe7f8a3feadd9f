mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use serde_json::json;

use common::{memory_store, messages, open_store, BrokenStorage, KEY};
use pawhaven::notify::Severity;
use pawhaven::storage::{KeyValueStorage, MemoryStorage};
use pawhaven::watchlist::{
    snapshot, AddOutcome, ItemDraft, ItemId, ToggleOutcome, WatchlistError, CLEARED_MESSAGE,
    REMOVED_MESSAGE,
};

fn buddy() -> ItemDraft {
    ItemDraft::new(1).with_field("name", "Buddy")
}

#[test]
fn add_duplicate_remove_scenario() {
    let (store, _storage, center) = memory_store();
    let id = ItemId::from(1);

    assert_eq!(store.add_to_watchlist(buddy()), AddOutcome::Added);
    assert_eq!(store.get_watchlist_count(), 1);

    assert_eq!(store.add_to_watchlist(buddy()), AddOutcome::Duplicate);
    assert_eq!(store.get_watchlist_count(), 1);

    store.remove_from_watchlist(&id);
    assert_eq!(store.get_watchlist_count(), 0);

    store.remove_from_watchlist(&id);
    assert_eq!(store.get_watchlist_count(), 0);

    assert_eq!(
        messages(&center),
        vec![
            "Buddy added to watchlist",
            "Buddy is already in your watchlist",
            REMOVED_MESSAGE,
            REMOVED_MESSAGE,
        ]
    );
    let severities: Vec<_> = center.received().into_iter().map(|n| n.severity).collect();
    assert_eq!(
        severities,
        vec![Severity::Success, Severity::Error, Severity::Success, Severity::Success]
    );
}

#[test]
fn duplicate_add_leaves_items_untouched() {
    let (store, _storage, center) = memory_store();
    store.add_to_watchlist(buddy().with_field("age", 3));
    let before = store.watchlist();

    store.add_to_watchlist(ItemDraft::new(1).with_field("name", "Someone else"));

    assert_eq!(store.watchlist(), before);
    assert_eq!(center.len(), 2);
}

#[test]
fn membership_follows_add_and_remove() {
    let (store, _storage, _center) = memory_store();
    let id = ItemId::from("collar-7");

    assert!(!store.is_in_watchlist(&id));
    store.add_to_watchlist(ItemDraft::new("collar-7").with_field("price", 14.99));
    assert!(store.is_in_watchlist(&id));
    assert!(!store.is_in_watchlist(&ItemId::from(7)));

    store.remove_from_watchlist(&id);
    assert!(!store.is_in_watchlist(&id));
}

#[test]
fn items_keep_fields_and_insertion_order() {
    let (store, _storage, _center) = memory_store();
    store.add_to_watchlist(ItemDraft::new(3).with_field("name", "Milo"));
    store.add_to_watchlist(
        ItemDraft::new("bed-2")
            .with_field("name", "Cozy bed")
            .with_field("price", 59),
    );
    store.add_to_watchlist(ItemDraft::new(1).with_field("name", "Buddy"));

    let items = store.watchlist();
    let ids: Vec<_> = items.iter().map(|i| i.id().to_string()).collect();
    assert_eq!(ids, vec!["3", "bed-2", "1"]);
    assert_eq!(items[1].field("price"), Some(&json!(59)));
    assert!(items.iter().all(|i| i.added_at().is_some()));
}

#[test]
fn every_mutation_is_persisted() {
    let (store, storage, _center) = memory_store();
    store.add_to_watchlist(buddy());
    store.add_to_watchlist(ItemDraft::new(2).with_field("name", "Luna"));
    store.remove_from_watchlist(&ItemId::from(1));

    let raw = storage.get(KEY).unwrap().unwrap();
    let persisted = snapshot::decode(&raw).unwrap();
    assert_eq!(persisted, store.watchlist());
    assert_eq!(persisted.len(), 1);
}

#[test]
fn reopening_restores_state() {
    let storage = Arc::new(MemoryStorage::new());
    let (first, _) = open_store(storage.clone());
    first.add_to_watchlist(buddy());
    first.add_to_watchlist(ItemDraft::new("toy-5").with_field("name", "Squeaky duck"));
    let expected = first.state();

    let (second, center) = open_store(storage);
    assert_eq!(second.state(), expected);
    assert!(center.is_empty(), "hydration must not notify");
}

#[test]
fn clear_removes_persisted_key() {
    let (store, storage, center) = memory_store();
    store.add_to_watchlist(buddy());
    assert!(storage.contains_key(KEY));

    store.clear_watchlist();

    assert_eq!(store.get_watchlist_count(), 0);
    assert_eq!(storage.get(KEY).unwrap(), None);
    assert_eq!(messages(&center).last().map(String::as_str), Some(CLEARED_MESSAGE));

    let (reopened, _) = open_store(storage);
    assert_eq!(reopened.get_watchlist_count(), 0);
}

#[test]
fn corrupted_snapshot_is_discarded() {
    let storage = Arc::new(MemoryStorage::new().with_entry(KEY, "not valid json"));
    let (store, center) = open_store(storage.clone());

    assert_eq!(store.get_watchlist_count(), 0);
    assert!(!storage.contains_key(KEY));
    assert!(center.is_empty());
}

#[test]
fn snapshot_with_wrong_shape_is_discarded() {
    for raw in [r#"{"id": 1}"#, r#"[{"name": "no id"}]"#, "[1, 2, 3]", "null"] {
        let storage = Arc::new(MemoryStorage::new().with_entry(KEY, raw));
        let (store, _) = open_store(storage.clone());
        assert_eq!(store.get_watchlist_count(), 0, "payload {}", raw);
        assert!(!storage.contains_key(KEY), "payload {}", raw);
    }
}

#[test]
fn foreign_snapshot_without_timestamps_loads() {
    let raw = r#"[{"id": 1, "name": "Buddy"}, {"id": "2", "name": "Luna"}]"#;
    let storage = Arc::new(MemoryStorage::new().with_entry(KEY, raw));
    let (store, _) = open_store(storage);

    assert_eq!(store.get_watchlist_count(), 2);
    assert!(store.is_in_watchlist(&ItemId::from(1)));
    assert!(store.is_in_watchlist(&ItemId::from("2")));
    assert!(!store.is_in_watchlist(&ItemId::from(2)));
}

#[test]
fn hydration_drops_duplicate_ids() {
    let raw = r#"[{"id": 1, "name": "Buddy"}, {"id": 1, "name": "Copy"}]"#;
    let storage = Arc::new(MemoryStorage::new().with_entry(KEY, raw));
    let (store, _) = open_store(storage);

    assert_eq!(store.get_watchlist_count(), 1);
    assert_eq!(store.get(&ItemId::from(1)).unwrap().label(), "Buddy");
}

#[test]
fn persistence_failure_keeps_in_memory_state() {
    let storage = Arc::new(BrokenStorage::default());
    let (store, center) = open_store(storage.clone());
    assert_eq!(storage.reads.load(Ordering::SeqCst), 1);

    assert_eq!(store.add_to_watchlist(buddy()), AddOutcome::Added);
    assert!(store.is_in_watchlist(&ItemId::from(1)));
    assert_eq!(storage.writes.load(Ordering::SeqCst), 1);

    store.clear_watchlist();
    assert_eq!(store.get_watchlist_count(), 0);
    assert_eq!(storage.removes.load(Ordering::SeqCst), 1);

    // Failures never reach the user.
    assert!(center.received().iter().all(|n| n.severity == Severity::Success));
    assert_eq!(center.len(), 2);
}

#[test]
fn quota_exceeded_does_not_roll_back() {
    let storage = Arc::new(MemoryStorage::with_quota(120));
    let (store, _) = open_store(storage.clone());

    store.add_to_watchlist(buddy());
    let persisted = storage.get(KEY).unwrap().unwrap();

    store.add_to_watchlist(ItemDraft::new(2).with_field("bio", "x".repeat(500)));

    assert_eq!(store.get_watchlist_count(), 2);
    assert_eq!(storage.get(KEY).unwrap().unwrap(), persisted);
}

#[test]
fn add_json_requires_id() {
    let (store, storage, center) = memory_store();

    let err = store.add_json(json!({ "name": "Nameless" })).unwrap_err();
    assert!(matches!(err, WatchlistError::MissingId));

    let err = store.add_json(json!("Buddy")).unwrap_err();
    assert!(matches!(err, WatchlistError::NotAnObject));

    assert_eq!(store.get_watchlist_count(), 0);
    assert!(center.is_empty());
    assert!(!storage.contains_key(KEY));
}

#[test]
fn add_json_copies_fields_verbatim() {
    let (store, _storage, center) = memory_store();
    let outcome = store
        .add_json(json!({
            "id": 12,
            "name": "Whiskers",
            "image": "/img/whiskers.png",
            "traits": { "indoor": true }
        }))
        .unwrap();

    assert_eq!(outcome, AddOutcome::Added);
    let item = store.get(&ItemId::from(12)).unwrap();
    assert_eq!(item.field("traits"), Some(&json!({ "indoor": true })));
    assert_eq!(item.field("image"), Some(&json!("/img/whiskers.png")));
    assert_eq!(messages(&center), vec!["Whiskers added to watchlist"]);
}

#[test]
fn toggle_adds_then_removes() {
    let (store, _storage, center) = memory_store();

    assert_eq!(store.toggle_watchlist(buddy()), ToggleOutcome::Added);
    assert!(store.is_in_watchlist(&ItemId::from(1)));

    assert_eq!(store.toggle_watchlist(buddy()), ToggleOutcome::Removed);
    assert!(!store.is_in_watchlist(&ItemId::from(1)));
    assert_eq!(center.len(), 2);
}

#[test]
fn concurrent_toggles_flip_membership_atomically() {
    let (store, _storage, center) = memory_store();
    let rounds = 200;

    let workers: Vec<_> = (0..2)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..rounds {
                    store.toggle_watchlist(buddy());
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let received = center.received();
    assert!(received.iter().all(|n| n.severity == Severity::Success));
    let added = received
        .iter()
        .filter(|n| n.message == "Buddy added to watchlist")
        .count();
    let removed = received.iter().filter(|n| n.message == REMOVED_MESSAGE).count();
    assert_eq!(added + removed, 2 * rounds);
    assert_eq!(added, removed);
    assert_eq!(store.get_watchlist_count(), 0);
}

#[test]
fn large_unsigned_ids_survive_reopening() {
    let raw = r#"[{"id": 9223372036854775808, "name": "Big"}]"#;
    let storage = Arc::new(MemoryStorage::new().with_entry(KEY, raw));
    let (store, _) = open_store(storage.clone());

    let id = ItemId::Unsigned(9_223_372_036_854_775_808);
    assert_eq!(store.get_watchlist_count(), 1);
    assert!(store.is_in_watchlist(&id));
    assert!(storage.contains_key(KEY));

    store.add_to_watchlist(ItemDraft::new(2));
    let (reopened, _) = open_store(storage);
    assert!(reopened.is_in_watchlist(&id));
    assert_eq!(reopened.get_watchlist_count(), 2);
}

#[test]
fn observers_see_every_transition() {
    let (store, _storage, _center) = memory_store();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    let id = store.subscribe(move |state| sink.lock().push(state.len()));

    store.add_to_watchlist(buddy());
    store.add_to_watchlist(buddy());
    store.add_to_watchlist(ItemDraft::new(2));
    store.remove_from_watchlist(&ItemId::from(1));
    store.clear_watchlist();

    assert_eq!(*seen.lock(), vec![1, 1, 2, 1, 0]);

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.add_to_watchlist(buddy());
    assert_eq!(seen.lock().len(), 5);
}

#[test]
fn observers_may_query_the_store() {
    let (store, _storage, _center) = memory_store();
    let counts = Arc::new(Mutex::new(Vec::new()));

    let handle = store.clone();
    let sink = counts.clone();
    store.subscribe(move |_| sink.lock().push(handle.get_watchlist_count()));

    store.add_to_watchlist(buddy());
    store.add_to_watchlist(ItemDraft::new(2));

    assert_eq!(*counts.lock(), vec![1, 2]);
}

#[test]
fn clones_share_state() {
    let (store, _storage, _center) = memory_store();
    let other = store.clone();

    other.add_to_watchlist(buddy());
    assert!(store.is_in_watchlist(&ItemId::from(1)));
    assert_eq!(store.key(), KEY);
}
