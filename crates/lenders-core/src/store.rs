//! The ledger store: the single authoritative collection of items.
//!
//! All mutations go through [`LedgerStore`], which notifies subscribers
//! synchronously after each change, in subscription order. The store is an
//! ordinary value passed by reference to whoever needs it.

use std::collections::HashSet;
use std::fmt;
use std::sync::mpsc::{self, Receiver};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{LedgerError, Result};
use crate::model::{
    ItemType, LedgerItem, LedgerItemUpdate, NewLedgerItem, NewWishlistItem, WishlistItem,
    WishlistItemUpdate,
};
use crate::observer::{ChannelObserver, StoreEvent, StoreObserver, SubscriptionId};
use crate::query::{self, StatusFilter};
use crate::snapshot::LedgerSnapshot;
use crate::stats::LedgerStats;
use crate::tags::normalize_tags;

/// In-memory ledger and wishlist, most recent first.
pub struct LedgerStore {
    items: Vec<LedgerItem>,
    wishlist: Vec<WishlistItem>,
    clock: Box<dyn Clock>,
    observers: Vec<(SubscriptionId, Box<dyn StoreObserver>)>,
    next_subscription: u64,
}

impl fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerStore")
            .field("items", &self.items.len())
            .field("wishlist", &self.wishlist.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore {
    /// Empty store on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            items: Vec::new(),
            wishlist: Vec::new(),
            clock: Box::new(clock),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Rebuild a store from a snapshot, dropping duplicate ids.
    pub fn from_snapshot(snapshot: LedgerSnapshot, clock: impl Clock + 'static) -> Self {
        let mut store = Self::with_clock(clock);

        let mut seen = HashSet::new();
        for item in snapshot.items {
            if seen.insert(item.id) {
                store.items.push(item);
            } else {
                tracing::warn!(id = %item.id, "dropping duplicate ledger item in snapshot");
            }
        }

        let mut seen = HashSet::new();
        for item in snapshot.wishlist {
            if seen.insert(item.id) {
                store.wishlist.push(item);
            } else {
                tracing::warn!(id = %item.id, "dropping duplicate wishlist item in snapshot");
            }
        }

        store
    }

    /// Export the current state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::new(self.items.clone(), self.wishlist.clone(), self.now())
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // --- Subscription ---

    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Subscribe through an mpsc channel instead of a callback.
    pub fn subscribe_channel(&mut self) -> (SubscriptionId, Receiver<StoreEvent>) {
        let (tx, rx) = mpsc::channel();
        (self.subscribe(ChannelObserver(tx)), rx)
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&self, event: StoreEvent) {
        tracing::debug!(?event, observers = self.observers.len(), "store mutation");
        for (_, observer) in &self.observers {
            observer.on_change(&event);
        }
    }

    // --- Reads ---

    pub fn items(&self) -> &[LedgerItem] {
        &self.items
    }

    pub fn wishlist_items(&self) -> &[WishlistItem] {
        &self.wishlist
    }

    pub fn item(&self, id: &Uuid) -> Option<&LedgerItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    pub fn wishlist_item(&self, id: &Uuid) -> Option<&WishlistItem> {
        self.wishlist.iter().find(|item| item.id == *id)
    }

    pub fn active_by_type(&self, item_type: ItemType) -> Vec<&LedgerItem> {
        query::active_by_type(&self.items, item_type)
    }

    pub fn archived_items(&self) -> Vec<&LedgerItem> {
        query::archived_items(&self.items)
    }

    pub fn by_status(&self, status: StatusFilter) -> Vec<&LedgerItem> {
        query::by_status(&self.items, status, self.now())
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats::compute(&self.items, &self.wishlist, self.now())
    }

    // --- Ledger item mutations ---

    /// Add a new item at the front of the ledger.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if name or person is empty or a tag
    /// is invalid. The store is left unchanged.
    pub fn add_item(&mut self, new_item: NewLedgerItem) -> Result<Uuid> {
        let id = self.fresh_item_id();
        let item = new_item.build(id, self.now())?;
        self.items.insert(0, item);
        self.notify(StoreEvent::ItemAdded { id });
        Ok(id)
    }

    /// Archive (soft delete) the given items. Unknown or already archived
    /// ids are ignored; the ids that changed are returned.
    pub fn archive_items(&mut self, ids: &[Uuid]) -> Vec<Uuid> {
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        let now = self.now();
        let mut changed = Vec::new();

        for item in self.items.iter_mut() {
            if wanted.contains(&item.id) && !item.is_archived {
                item.is_archived = true;
                item.archived_at = Some(now);
                changed.push(item.id);
            }
        }

        if !changed.is_empty() {
            self.notify(StoreEvent::ItemsArchived {
                ids: changed.clone(),
            });
        }
        changed
    }

    /// Return an archived item to the active views.
    ///
    /// Returns false (and does nothing) if the item is missing or active.
    pub fn recover_item(&mut self, id: &Uuid) -> bool {
        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.id == *id && item.is_archived)
        else {
            return false;
        };

        item.is_archived = false;
        item.archived_at = None;
        self.notify(StoreEvent::ItemRecovered { id: *id });
        true
    }

    /// Remove items irreversibly. Unknown ids are ignored.
    pub fn permanently_delete_items(&mut self, ids: &[Uuid]) -> Vec<Uuid> {
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        let removed = remove_where(&mut self.items, |item| wanted.contains(&item.id));

        if !removed.is_empty() {
            self.notify(StoreEvent::ItemsDeleted {
                ids: removed.clone(),
            });
        }
        removed
    }

    /// Replace mutable fields of an item; `id`, `date` and archive state are
    /// never touched. Observers hear about it only if a field changed.
    ///
    /// # Errors
    ///
    /// - `LedgerError::NotFound` if no item has this id
    /// - `LedgerError::Validation` for empty name/person or invalid tags
    pub fn update_item(&mut self, id: &Uuid, update: LedgerItemUpdate) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or_else(|| LedgerError::not_found_item(id))?;

        if update.apply(item)? {
            self.notify(StoreEvent::ItemUpdated { id: *id });
        }
        Ok(())
    }

    /// Permanently remove items that have stayed archived for at least
    /// `retention`. Items archived without a timestamp are kept.
    pub fn purge_expired_archives(&mut self, retention: Duration) -> Vec<Uuid> {
        // a retention reaching past the earliest representable time purges nothing
        let Some(cutoff) = self.now().checked_sub_signed(retention) else {
            return Vec::new();
        };
        let purged = remove_where(&mut self.items, |item| {
            item.is_archived && item.archived_at.is_some_and(|at| at <= cutoff)
        });

        if !purged.is_empty() {
            tracing::info!(count = purged.len(), "purged expired archived items");
            self.notify(StoreEvent::ItemsPurged {
                ids: purged.clone(),
            });
        }
        purged
    }

    /// Insert fetched items whose id is not known yet. Existing items win.
    ///
    /// Items with invalid tags or empty required fields are skipped.
    pub fn merge_items(&mut self, fetched: Vec<LedgerItem>) -> Vec<Uuid> {
        let mut merged = Vec::new();

        for mut item in fetched {
            if self.item(&item.id).is_some() {
                continue;
            }
            if item.name.trim().is_empty() || item.person.trim().is_empty() {
                tracing::warn!(id = %item.id, "skipping fetched item without name or person");
                continue;
            }
            match normalize_tags(&item.tags) {
                Ok(tags) => item.tags = tags,
                Err(err) => {
                    tracing::warn!(id = %item.id, error = %err, "skipping fetched item");
                    continue;
                }
            }

            // keep most-recent-first order
            let pos = self
                .items
                .iter()
                .position(|existing| existing.date < item.date)
                .unwrap_or(self.items.len());
            merged.push(item.id);
            self.items.insert(pos, item);
        }

        if !merged.is_empty() {
            self.notify(StoreEvent::ItemsMerged {
                ids: merged.clone(),
            });
        }
        merged
    }

    // --- Wishlist mutations ---

    /// Add a wishlist item at the front of the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` for an empty name, a negative price
    /// or invalid tags.
    pub fn add_wishlist_item(&mut self, new_item: NewWishlistItem) -> Result<Uuid> {
        let id = self.fresh_wishlist_id();
        let item = new_item.build(id, self.now())?;
        self.wishlist.insert(0, item);
        self.notify(StoreEvent::WishlistItemAdded { id });
        Ok(id)
    }

    pub fn update_wishlist_item(&mut self, id: &Uuid, update: WishlistItemUpdate) -> Result<()> {
        let item = self
            .wishlist
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or_else(|| LedgerError::not_found_wishlist(id))?;

        if update.apply(item)? {
            self.notify(StoreEvent::WishlistItemUpdated { id: *id });
        }
        Ok(())
    }

    pub fn delete_wishlist_items(&mut self, ids: &[Uuid]) -> Vec<Uuid> {
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        let removed = remove_where(&mut self.wishlist, |item| wanted.contains(&item.id));

        if !removed.is_empty() {
            self.notify(StoreEvent::WishlistItemsDeleted {
                ids: removed.clone(),
            });
        }
        removed
    }

    /// Insert fetched wishlist items whose id is not known yet.
    pub fn merge_wishlist_items(&mut self, fetched: Vec<WishlistItem>) -> Vec<Uuid> {
        let mut merged = Vec::new();

        for mut item in fetched {
            if self.wishlist_item(&item.id).is_some() || item.name.trim().is_empty() {
                continue;
            }
            match normalize_tags(&item.tags) {
                Ok(tags) => item.tags = tags,
                Err(err) => {
                    tracing::warn!(id = %item.id, error = %err, "skipping fetched wishlist item");
                    continue;
                }
            }
            merged.push(item.id);
            self.wishlist.push(item);
        }

        if !merged.is_empty() {
            self.notify(StoreEvent::WishlistItemsMerged {
                ids: merged.clone(),
            });
        }
        merged
    }

    fn fresh_item_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.item(&id).is_none() {
                return id;
            }
        }
    }

    fn fresh_wishlist_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.wishlist_item(&id).is_none() {
                return id;
            }
        }
    }
}

/// Remove matching elements in place, returning their ids in store order.
fn remove_where<T: HasId>(items: &mut Vec<T>, mut pred: impl FnMut(&T) -> bool) -> Vec<Uuid> {
    let mut removed = Vec::new();
    items.retain(|item| {
        if pred(item) {
            removed.push(item.id());
            false
        } else {
            true
        }
    });
    removed
}

trait HasId {
    fn id(&self) -> Uuid;
}

impl HasId for LedgerItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HasId for WishlistItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::TimeZone;

    use crate::clock::ManualClock;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 29, 10, 0, 0).unwrap()
    }

    fn store_with_clock() -> (LedgerStore, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new(start()));
        (LedgerStore::with_clock(Rc::clone(&clock)), clock)
    }

    #[test]
    fn test_add_inserts_at_front() {
        let (mut store, clock) = store_with_clock();
        store
            .add_item(NewLedgerItem::new("Ladder", "Carlos", ItemType::Borrowed))
            .unwrap();
        clock.advance(Duration::minutes(1));
        let id = store
            .add_item(NewLedgerItem::new("HDMI Cable", "Diana", ItemType::Lent))
            .unwrap();

        assert_eq!(store.items().len(), 2);
        assert_eq!(store.items()[0].id, id);
        assert_eq!(store.items()[0].date, start() + Duration::minutes(1));
    }

    #[test]
    fn test_add_rejects_empty_name_and_leaves_store_unchanged() {
        let (mut store, _clock) = store_with_clock();
        let (_sub, rx) = store.subscribe_channel();

        let err = store
            .add_item(NewLedgerItem::new("", "Sam", ItemType::Lent))
            .unwrap_err();

        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(store.items().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_archive_sets_timestamp_and_recover_clears_it() {
        let (mut store, clock) = store_with_clock();
        let id = store
            .add_item(NewLedgerItem::new("Drill", "Sam", ItemType::Borrowed))
            .unwrap();

        clock.advance(Duration::days(3));
        assert_eq!(store.archive_items(&[id]), vec![id]);
        let item = store.item(&id).unwrap();
        assert!(item.is_archived);
        assert_eq!(item.archived_at, Some(start() + Duration::days(3)));

        assert!(store.recover_item(&id));
        let item = store.item(&id).unwrap();
        assert!(!item.is_archived);
        assert_eq!(item.archived_at, None);
    }

    #[test]
    fn test_archive_unknown_and_repeated_ids_are_noops() {
        let (mut store, _clock) = store_with_clock();
        let id = store
            .add_item(NewLedgerItem::new("Tent", "Ana", ItemType::Lent))
            .unwrap();
        store.archive_items(&[id]);

        let (_sub, rx) = store.subscribe_channel();
        assert!(store.archive_items(&[id, Uuid::new_v4()]).is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_recover_active_item_is_noop() {
        let (mut store, _clock) = store_with_clock();
        let id = store
            .add_item(NewLedgerItem::new("Tent", "Ana", ItemType::Lent))
            .unwrap();
        assert!(!store.recover_item(&id));
        assert!(!store.recover_item(&Uuid::new_v4()));
    }

    #[test]
    fn test_update_missing_item_is_not_found() {
        let (mut store, _clock) = store_with_clock();
        let err = store
            .update_item(&Uuid::new_v4(), LedgerItemUpdate::new().name("X"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[test]
    fn test_update_keeps_immutable_fields() {
        let (mut store, clock) = store_with_clock();
        let id = store
            .add_item(NewLedgerItem::new("Book", "Alex", ItemType::Lent))
            .unwrap();
        clock.advance(Duration::days(1));

        store
            .update_item(
                &id,
                LedgerItemUpdate::new()
                    .name("Dune")
                    .item_type(ItemType::Borrowed)
                    .tags(["SciFi"]),
            )
            .unwrap();

        let item = store.item(&id).unwrap();
        assert_eq!(item.id, id);
        assert_eq!(item.date, start());
        assert_eq!(item.name, "Dune");
        assert_eq!(item.item_type, ItemType::Borrowed);
        assert_eq!(item.tags, vec!["scifi"]);
    }

    #[test]
    fn test_observers_see_events_in_mutation_order() {
        let (mut store, _clock) = store_with_clock();
        let log: Rc<RefCell<Vec<StoreEvent>>> = Rc::default();
        let sink = Rc::clone(&log);
        store.subscribe(move |event: &StoreEvent| sink.borrow_mut().push(event.clone()));

        let id = store
            .add_item(NewLedgerItem::new("Drill", "Sam", ItemType::Borrowed))
            .unwrap();
        store.archive_items(&[id]);
        store.recover_item(&id);
        store.permanently_delete_items(&[id]);

        assert_eq!(
            *log.borrow(),
            vec![
                StoreEvent::ItemAdded { id },
                StoreEvent::ItemsArchived { ids: vec![id] },
                StoreEvent::ItemRecovered { id },
                StoreEvent::ItemsDeleted { ids: vec![id] },
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let (mut store, _clock) = store_with_clock();
        let (sub, rx) = store.subscribe_channel();
        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));

        store
            .add_item(NewLedgerItem::new("Drill", "Sam", ItemType::Borrowed))
            .unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_purge_only_removes_expired_archives() {
        let (mut store, clock) = store_with_clock();
        let old = store
            .add_item(NewLedgerItem::new("Old", "A", ItemType::Lent))
            .unwrap();
        let recent = store
            .add_item(NewLedgerItem::new("Recent", "B", ItemType::Lent))
            .unwrap();
        let active = store
            .add_item(NewLedgerItem::new("Active", "C", ItemType::Lent))
            .unwrap();

        store.archive_items(&[old]);
        clock.advance(Duration::days(20));
        store.archive_items(&[recent]);
        clock.advance(Duration::days(10));

        let purged = store.purge_expired_archives(Duration::days(30));
        assert_eq!(purged, vec![old]);
        assert!(store.item(&recent).is_some());
        assert!(store.item(&active).is_some());
    }

    #[test]
    fn test_purge_with_huge_retention_keeps_everything() {
        let (mut store, _clock) = store_with_clock();
        let id = store
            .add_item(NewLedgerItem::new("Lamp", "Kim", ItemType::Lent))
            .unwrap();
        store.archive_items(&[id]);

        let purged = store.purge_expired_archives(Duration::days(i64::from(u32::MAX)));
        assert!(purged.is_empty());
        assert!(store.item(&id).is_some());
    }

    #[test]
    fn test_purge_keeps_archives_without_timestamp() {
        let (mut store, clock) = store_with_clock();
        let id = store
            .add_item(NewLedgerItem::new("Legacy", "A", ItemType::Lent))
            .unwrap();
        store.archive_items(&[id]);
        store.items[0].archived_at = None;
        clock.advance(Duration::days(365));

        assert!(store.purge_expired_archives(Duration::days(30)).is_empty());
    }

    #[test]
    fn test_merge_skips_known_ids_and_keeps_date_order() {
        let (mut store, clock) = store_with_clock();
        let first = store
            .add_item(NewLedgerItem::new("First", "A", ItemType::Lent))
            .unwrap();
        clock.advance(Duration::days(2));
        let second = store
            .add_item(NewLedgerItem::new("Second", "B", ItemType::Lent))
            .unwrap();

        let mut between = store.item(&first).unwrap().clone();
        between.id = Uuid::new_v4();
        between.name = "Between".to_string();
        between.date = start() + Duration::days(1);
        let known = store.item(&second).unwrap().clone();

        let merged = store.merge_items(vec![known, between.clone()]);
        assert_eq!(merged, vec![between.id]);
        let names: Vec<&str> = store.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "Between", "First"]);
    }

    #[test]
    fn test_wishlist_lifecycle() {
        let (mut store, _clock) = store_with_clock();
        let id = store
            .add_wishlist_item(NewWishlistItem::new("Kayak").with_tags(["Outdoor"]))
            .unwrap();

        store
            .update_wishlist_item(&id, WishlistItemUpdate::new().estimated_price(Some(120.0)))
            .unwrap();
        assert_eq!(store.wishlist_item(&id).unwrap().estimated_price, Some(120.0));

        let err = store
            .update_wishlist_item(&Uuid::new_v4(), WishlistItemUpdate::new().name("X"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));

        assert_eq!(store.delete_wishlist_items(&[id]), vec![id]);
        assert!(store.wishlist_items().is_empty());
    }

    #[test]
    fn test_updates_that_change_nothing_emit_nothing() {
        let (mut store, _clock) = store_with_clock();
        let item_id = store
            .add_item(NewLedgerItem::new("Book", "Alex", ItemType::Lent).with_tags(["books"]))
            .unwrap();
        let wish_id = store
            .add_wishlist_item(NewWishlistItem::new("Kayak").with_estimated_price(349.0))
            .unwrap();
        let (_sub, rx) = store.subscribe_channel();

        store.update_item(&item_id, LedgerItemUpdate::new()).unwrap();
        store
            .update_item(&item_id, LedgerItemUpdate::new().name("Book").tags(["Books"]))
            .unwrap();
        store
            .update_wishlist_item(&wish_id, WishlistItemUpdate::new())
            .unwrap();
        store
            .update_wishlist_item(&wish_id, WishlistItemUpdate::new().estimated_price(Some(349.0)))
            .unwrap();
        assert!(rx.try_recv().is_err());

        store
            .update_item(&item_id, LedgerItemUpdate::new().name("Dune"))
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::ItemUpdated { id: item_id });
    }

    #[test]
    fn test_snapshot_round_trip_drops_duplicates() {
        let (mut store, _clock) = store_with_clock();
        store
            .add_item(NewLedgerItem::new("Drill", "Sam", ItemType::Borrowed))
            .unwrap();
        let mut snapshot = store.snapshot();
        let dup = snapshot.items[0].clone();
        snapshot.items.push(dup);

        let restored = LedgerStore::from_snapshot(snapshot, ManualClock::new(start()));
        assert_eq!(restored.items().len(), 1);
    }
}
