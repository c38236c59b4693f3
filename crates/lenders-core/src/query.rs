//! Filtered and searched views over the store's collections.
//!
//! Everything here is a pure function of its inputs. Views borrow from the
//! collection and preserve its order (most recent first).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::{LedgerError, Result};
use crate::model::{ItemType, LedgerItem, WishlistItem};
use crate::tags::normalize_tag;

/// Status predicates over active items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Overdue,
    AllActive,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Overdue => "Overdue",
            StatusFilter::AllActive => "All Active",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overdue" => Ok(StatusFilter::Overdue),
            "active" | "all" | "all-active" | "all active" => Ok(StatusFilter::AllActive),
            other => Err(LedgerError::Validation(format!(
                "Unknown status \"{}\" (expected overdue or active)",
                other
            ))),
        }
    }
}

/// Active items of one type.
pub fn active_by_type(items: &[LedgerItem], item_type: ItemType) -> Vec<&LedgerItem> {
    items
        .iter()
        .filter(|item| item.item_type == item_type && !item.is_archived)
        .collect()
}

/// Soft-deleted items.
pub fn archived_items(items: &[LedgerItem]) -> Vec<&LedgerItem> {
    items.iter().filter(|item| item.is_archived).collect()
}

/// Active items only.
pub fn active_items(items: &[LedgerItem]) -> Vec<&LedgerItem> {
    items.iter().filter(|item| !item.is_archived).collect()
}

/// Case-insensitive containment search over name, person and tags.
///
/// An empty query returns the collection unchanged.
pub fn search<'a, I>(collection: I, query: &str) -> Vec<&'a LedgerItem>
where
    I: IntoIterator<Item = &'a LedgerItem>,
{
    if query.is_empty() {
        return collection.into_iter().collect();
    }
    let needle = query.to_lowercase();
    collection
        .into_iter()
        .filter(|item| {
            contains_folded(&item.name, &needle)
                || contains_folded(&item.person, &needle)
                || item.tags.iter().any(|tag| contains_folded(tag, &needle))
        })
        .collect()
}

/// Active items carrying `tag` (compared after normalization).
pub fn by_tag<'a>(items: &'a [LedgerItem], tag: &str) -> Vec<&'a LedgerItem> {
    let Ok(tag) = normalize_tag(tag) else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| !item.is_archived && item.tags.iter().any(|t| *t == tag))
        .collect()
}

/// Active items matching a status predicate at `now`.
pub fn by_status(
    items: &[LedgerItem],
    status: StatusFilter,
    now: DateTime<Utc>,
) -> Vec<&LedgerItem> {
    items
        .iter()
        .filter(|item| match status {
            StatusFilter::Overdue => item.is_overdue_at(now),
            StatusFilter::AllActive => !item.is_archived,
        })
        .collect()
}

/// The first `limit` active items, for a recent-activity list.
pub fn recent_activity(items: &[LedgerItem], limit: usize) -> Vec<&LedgerItem> {
    items
        .iter()
        .filter(|item| !item.is_archived)
        .take(limit)
        .collect()
}

/// Case-insensitive search over wishlist name, description and tags.
pub fn search_wishlist<'a>(items: &'a [WishlistItem], query: &str) -> Vec<&'a WishlistItem> {
    if query.is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            contains_folded(&item.name, &needle)
                || item
                    .description
                    .as_deref()
                    .is_some_and(|d| contains_folded(d, &needle))
                || item.tags.iter().any(|tag| contains_folded(tag, &needle))
        })
        .collect()
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

/// A single cross-view filter: tag, type or status, never more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemFilter {
    Tag(String),
    Type(ItemType),
    Status(StatusFilter),
}

impl ItemFilter {
    /// Apply the filter. Type and tag filters only ever yield active items.
    pub fn apply<'a>(&self, items: &'a [LedgerItem], now: DateTime<Utc>) -> Vec<&'a LedgerItem> {
        match self {
            ItemFilter::Tag(tag) => by_tag(items, tag),
            ItemFilter::Type(item_type) => active_by_type(items, *item_type),
            ItemFilter::Status(status) => by_status(items, *status, now),
        }
    }

    /// Short label for the active filter, e.g. "Tag: tools".
    pub fn description(&self) -> String {
        match self {
            ItemFilter::Tag(tag) => format!("Tag: {}", tag),
            ItemFilter::Type(item_type) => format!("Type: {}", item_type),
            ItemFilter::Status(status) => format!("Status: {}", status),
        }
    }
}
