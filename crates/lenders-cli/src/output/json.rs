//! JSON output formatting for ledger and wishlist items.

use chrono::{DateTime, Utc};
use serde_json::json;

use lenders_core::{LedgerItem, LedgerStats, WishlistItem};

/// Convert an item to JSON for output.
///
/// Photo bytes are omitted; `has_image` says whether one is attached.
pub fn item_json(item: &LedgerItem, now: DateTime<Utc>) -> serde_json::Value {
    json!({
        "id": item.id,
        "name": item.name,
        "person": item.person,
        "type": item.item_type.as_str(),
        "date": item.date,
        "return_by_date": item.return_by_date,
        "is_archived": item.is_archived,
        "archived_at": item.archived_at,
        "is_overdue": item.is_overdue_at(now),
        "condition_notes": item.condition_notes,
        "tags": item.tags,
        "has_image": item.image_data.is_some(),
    })
}

pub fn items_json(items: &[&LedgerItem], now: DateTime<Utc>) -> Vec<serde_json::Value> {
    items.iter().map(|item| item_json(item, now)).collect()
}

pub fn wishlist_item_json(item: &WishlistItem) -> serde_json::Value {
    json!({
        "id": item.id,
        "name": item.name,
        "description": item.description,
        "estimated_price": item.estimated_price,
        "priority": item.priority.as_str(),
        "date_added": item.date_added,
        "tags": item.tags,
    })
}

pub fn wishlist_items_json(items: &[&WishlistItem]) -> Vec<serde_json::Value> {
    items.iter().map(|item| wishlist_item_json(item)).collect()
}

/// Dashboard JSON: counts, popular tags and recent activity.
pub fn stats_json(
    stats: &LedgerStats,
    popular_tags: &[(String, usize)],
    recent: &[&LedgerItem],
    now: DateTime<Utc>,
) -> serde_json::Value {
    json!({
        "lent": stats.lent,
        "borrowed": stats.borrowed,
        "overdue": stats.overdue,
        "total_active": stats.total_active,
        "archived": stats.archived,
        "wishlist": stats.wishlist,
        "popular_tags": popular_tags
            .iter()
            .map(|(tag, count)| json!({ "tag": tag, "count": count }))
            .collect::<Vec<_>>(),
        "recent": items_json(recent, now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use lenders_core::ItemType;
    use uuid::Uuid;

    #[test]
    fn test_item_json_shape() {
        let date = Utc.with_ymd_and_hms(2025, 7, 29, 9, 0, 0).unwrap();
        let item = LedgerItem {
            id: Uuid::new_v4(),
            name: "Ladder".to_string(),
            person: "Carlos".to_string(),
            item_type: ItemType::Borrowed,
            date,
            return_by_date: Some(date + Duration::days(1)),
            is_archived: false,
            archived_at: None,
            condition_notes: None,
            image_data: Some(vec![1, 2, 3]),
            tags: vec!["tools".to_string()],
        };

        let value = item_json(&item, date + Duration::days(2));
        assert_eq!(value["type"], "Borrowed");
        assert_eq!(value["is_overdue"], true);
        assert_eq!(value["has_image"], true);
        assert!(value.get("image_data").is_none());
        assert_eq!(value["tags"][0], "tools");
    }
}
