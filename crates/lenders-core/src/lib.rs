//! # Lender's Ledger Core
//!
//! Core library for Lender's Ledger, a personal record of things lent to and
//! borrowed from other people, plus a wishlist.
//!
//! This crate holds the domain model and every rule about it, independent of
//! any interface.
//!
//! ## Architecture
//!
//! - **model**: ledger items, wishlist items and their builders
//! - **tags**: tag normalization
//! - **store**: the authoritative collection and its lifecycle operations
//! - **observer**: change notification for subscribers
//! - **query** / **stats**: filtered views and dashboard counts
//! - **transfer**: the shareable JSON record for item hand-off
//! - **snapshot**: local persistence
//! - **remote** / **calendar**: sync and reminder boundaries

pub mod calendar;
pub mod clock;
pub mod error;
pub mod fs;
pub mod model;
pub mod observer;
pub mod query;
pub mod remote;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod tags;
pub mod transfer;

pub use calendar::{add_return_reminder, CalendarService, IcsCalendar, ReturnReminder};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LedgerError, Result};
pub use model::{
    ItemType, LedgerItem, LedgerItemUpdate, NewLedgerItem, NewWishlistItem, WishlistItem,
    WishlistItemUpdate, WishlistPriority,
};
pub use observer::{StoreEvent, StoreObserver, SubscriptionId, TracingObserver};
pub use query::{ItemFilter, StatusFilter};
pub use remote::{DirectoryRemoteStore, RecordId, RemoteStore, ShareHandle};
pub use snapshot::{load_snapshot, save_snapshot, LedgerSnapshot};
pub use stats::LedgerStats;
pub use store::LedgerStore;
pub use transfer::TransferRecord;

/// Days an archived item is kept before the retention sweep removes it.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
