//! Change notification for store subscribers.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable description of one completed store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    ItemAdded { id: Uuid },
    ItemUpdated { id: Uuid },
    ItemsArchived { ids: Vec<Uuid> },
    ItemRecovered { id: Uuid },
    ItemsDeleted { ids: Vec<Uuid> },
    /// Archived items removed by the retention sweep
    ItemsPurged { ids: Vec<Uuid> },
    /// Items merged in from a remote fetch
    ItemsMerged { ids: Vec<Uuid> },
    WishlistItemAdded { id: Uuid },
    WishlistItemUpdated { id: Uuid },
    WishlistItemsDeleted { ids: Vec<Uuid> },
    WishlistItemsMerged { ids: Vec<Uuid> },
}

/// Receives store events synchronously, right after each mutation.
pub trait StoreObserver {
    fn on_change(&self, event: &StoreEvent);
}

impl<F> StoreObserver for F
where
    F: Fn(&StoreEvent),
{
    fn on_change(&self, event: &StoreEvent) {
        self(event)
    }
}

/// Forwards events into an mpsc channel. A disconnected receiver is ignored.
#[derive(Debug)]
pub struct ChannelObserver(pub Sender<StoreEvent>);

impl StoreObserver for ChannelObserver {
    fn on_change(&self, event: &StoreEvent) {
        let _ = self.0.send(event.clone());
    }
}

/// Handle returned by `LedgerStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Emits every event as a `tracing` debug record.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl StoreObserver for TracingObserver {
    fn on_change(&self, event: &StoreEvent) {
        tracing::debug!(?event, "ledger store changed");
    }
}
