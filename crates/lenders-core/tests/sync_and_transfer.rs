use chrono::{Duration, TimeZone, Utc};
use tempfile::tempdir;

use lenders_core::transfer::{decode, encode};
use lenders_core::{
    load_snapshot, save_snapshot, DirectoryRemoteStore, ItemType, LedgerError, LedgerStore,
    ManualClock, NewLedgerItem, NewWishlistItem, RemoteStore, SystemClock, TransferRecord,
    WishlistPriority,
};

fn seeded_store() -> LedgerStore {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 7, 29, 9, 0, 0).unwrap());
    let mut store = LedgerStore::with_clock(clock);
    store
        .add_item(
            NewLedgerItem::new("Test Book", "Alice", ItemType::Lent)
                .with_return_by_date(Utc.with_ymd_and_hms(2025, 8, 5, 9, 0, 0).unwrap())
                .with_condition_notes("Good condition")
                .with_image_data(vec![0x89, 0x50, 0x4E, 0x47])
                .with_tags(["Books", "fiction"]),
        )
        .expect("add should succeed");
    store
        .add_wishlist_item(
            NewWishlistItem::new("Kayak")
                .with_estimated_price(349.0)
                .with_priority(WishlistPriority::High),
        )
        .expect("add should succeed");
    store
}

#[test]
fn test_shared_item_accepted_into_another_ledger() {
    let sender = seeded_store();
    let original = &sender.items()[0];
    let text = encode(original).expect("encode should succeed");

    let mut receiver = LedgerStore::new();
    let record = TransferRecord::parse(&text).expect("parse should succeed");
    let id = receiver
        .add_item(record.into_new_item())
        .expect("accept should succeed");

    let accepted = receiver.item(&id).expect("item should exist");
    assert_ne!(accepted.id, original.id);
    assert_eq!(accepted.name, original.name);
    assert_eq!(accepted.person, original.person);
    assert_eq!(accepted.item_type, original.item_type);
    assert_eq!(accepted.date, original.date);
    assert_eq!(accepted.return_by_date, original.return_by_date);
    assert_eq!(accepted.condition_notes, original.condition_notes);
    assert_eq!(accepted.tags, original.tags);
    assert!(accepted.image_data.is_none());
}

#[test]
fn test_round_trip_law_over_varied_items() {
    let base = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();
    let mut store = LedgerStore::with_clock(ManualClock::new(base));
    for (i, item_type) in [ItemType::Lent, ItemType::Borrowed].into_iter().enumerate() {
        let mut new_item = NewLedgerItem::new(format!("Ünïcode \"item\" {}", i), "O'Brien, Pat", item_type)
            .with_tags(["a", "b-c"]);
        if i == 0 {
            new_item = new_item
                .with_return_by_date(base + Duration::days(30))
                .with_condition_notes("line one\nline two");
        }
        store.add_item(new_item).expect("add should succeed");
    }
    let archived = store.items()[0].id;
    store.archive_items(&[archived]);

    for item in store.items() {
        let decoded = decode(&encode(item).expect("encode should succeed"))
            .expect("decode should succeed");
        assert_eq!(decoded.name, item.name);
        assert_eq!(decoded.person, item.person);
        assert_eq!(decoded.item_type, item.item_type);
        assert_eq!(decoded.date, item.date);
        assert_eq!(decoded.return_by_date, item.return_by_date);
        assert_eq!(decoded.condition_notes, item.condition_notes);
        assert_eq!(decoded.tags, item.tags);
        assert_ne!(decoded.id, item.id);
        assert!(!decoded.is_archived);
    }
}

#[test]
fn test_malformed_text_is_reported() {
    let err = decode("{\"name\":\"Drill\"}").unwrap_err();
    assert!(matches!(err, LedgerError::MalformedTransferRecord(_)));
}

#[test]
fn test_snapshot_survives_save_and_load() {
    let dir = tempdir().expect("tempdir should be created");
    let path = dir.path().join("ledger.json");
    let store = seeded_store();

    save_snapshot(&path, &store.snapshot()).expect("save should succeed");
    let restored = LedgerStore::from_snapshot(
        load_snapshot(&path).expect("load should succeed"),
        SystemClock,
    );

    assert_eq!(restored.items(), store.items());
    assert_eq!(restored.wishlist_items(), store.wishlist_items());
}

#[test]
fn test_push_then_pull_into_empty_store() {
    let dir = tempdir().expect("tempdir should be created");
    let remote = DirectoryRemoteStore::new(dir.path());
    let store = seeded_store();

    for item in store.items() {
        remote.save_item(item).expect("save should succeed");
    }
    for item in store.wishlist_items() {
        remote.save_wishlist_item(item).expect("save should succeed");
    }

    let mut other = LedgerStore::new();
    let merged = other.merge_items(remote.fetch_items().expect("fetch should succeed"));
    let merged_wishlist =
        other.merge_wishlist_items(remote.fetch_wishlist_items().expect("fetch should succeed"));

    assert_eq!(merged.len(), 1);
    assert_eq!(merged_wishlist.len(), 1);
    assert_eq!(other.items(), store.items());
    assert_eq!(other.wishlist_items(), store.wishlist_items());

    // pulling again changes nothing
    assert!(other
        .merge_items(remote.fetch_items().expect("fetch should succeed"))
        .is_empty());
}
