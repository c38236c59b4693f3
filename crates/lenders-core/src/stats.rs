//! Dashboard statistics. Computed from a snapshot on every call.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{ItemType, LedgerItem, WishlistItem};

/// Number of active items of one type.
pub fn count_by_type(items: &[LedgerItem], item_type: ItemType) -> usize {
    items
        .iter()
        .filter(|item| !item.is_archived && item.item_type == item_type)
        .count()
}

/// Number of active items past their return date at `now`.
pub fn count_overdue(items: &[LedgerItem], now: DateTime<Utc>) -> usize {
    items.iter().filter(|item| item.is_overdue_at(now)).count()
}

/// All tags used by active items, deduplicated and sorted ascending.
pub fn distinct_active_tags(items: &[LedgerItem]) -> Vec<String> {
    items
        .iter()
        .filter(|item| !item.is_archived)
        .flat_map(|item| item.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Tag usage across active items, most used first, ties by tag name.
pub fn tag_frequency(items: &[LedgerItem]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for tag in items
        .iter()
        .filter(|item| !item.is_archived)
        .flat_map(|item| item.tags.iter())
    {
        *counts.entry(tag.as_str()).or_default() += 1;
    }

    let mut frequency: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    // stable sort keeps BTreeMap's ascending tag order within equal counts
    frequency.sort_by(|a, b| b.1.cmp(&a.1));
    frequency
}

/// Summary counts shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    pub lent: usize,
    pub borrowed: usize,
    pub overdue: usize,
    pub total_active: usize,
    pub archived: usize,
    pub wishlist: usize,
}

impl LedgerStats {
    pub fn compute(items: &[LedgerItem], wishlist: &[WishlistItem], now: DateTime<Utc>) -> Self {
        let lent = count_by_type(items, ItemType::Lent);
        let borrowed = count_by_type(items, ItemType::Borrowed);
        Self {
            lent,
            borrowed,
            overdue: count_overdue(items, now),
            total_active: lent + borrowed,
            archived: items.iter().filter(|item| item.is_archived).count(),
            wishlist: wishlist.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap()
    }

    fn item(item_type: ItemType, tags: &[&str]) -> LedgerItem {
        LedgerItem {
            id: Uuid::new_v4(),
            name: "thing".to_string(),
            person: "someone".to_string(),
            item_type,
            date: now(),
            return_by_date: None,
            is_archived: false,
            archived_at: None,
            condition_notes: None,
            image_data: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_distinct_active_tags_sorted_and_deduplicated() {
        let items = vec![
            item(ItemType::Lent, &["tools"]),
            item(ItemType::Borrowed, &["tools", "outdoor"]),
        ];
        assert_eq!(distinct_active_tags(&items), vec!["outdoor", "tools"]);
    }

    #[test]
    fn test_archived_items_do_not_count() {
        let mut archived = item(ItemType::Lent, &["secret"]);
        archived.is_archived = true;
        archived.return_by_date = Some(now() - Duration::days(5));
        let items = vec![archived, item(ItemType::Lent, &["books"])];

        assert_eq!(count_by_type(&items, ItemType::Lent), 1);
        assert_eq!(count_overdue(&items, now()), 0);
        assert_eq!(distinct_active_tags(&items), vec!["books"]);
    }

    #[test]
    fn test_tag_frequency_orders_by_count_then_name() {
        let items = vec![
            item(ItemType::Lent, &["tools", "garden"]),
            item(ItemType::Lent, &["tools", "books"]),
        ];
        assert_eq!(
            tag_frequency(&items),
            vec![
                ("tools".to_string(), 2),
                ("books".to_string(), 1),
                ("garden".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_compute_summary() {
        let mut overdue = item(ItemType::Borrowed, &[]);
        overdue.return_by_date = Some(now() - Duration::hours(2));
        let mut archived = item(ItemType::Lent, &[]);
        archived.is_archived = true;
        let items = vec![item(ItemType::Lent, &[]), overdue, archived];

        let stats = LedgerStats::compute(&items, &[], now());
        assert_eq!(
            stats,
            LedgerStats {
                lent: 1,
                borrowed: 1,
                overdue: 1,
                total_active: 2,
                archived: 1,
                wishlist: 0,
            }
        );
    }
}
