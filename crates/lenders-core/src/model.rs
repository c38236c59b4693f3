//! Entity model: ledger items, wishlist items and their derived fields.
//!
//! Stored fields only. Everything time-dependent (`is_overdue`) or
//! presentational (formatted dates and prices) is computed on demand.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LedgerError, Result};
use crate::tags::normalize_tags;

/// Direction of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Lent,
    Borrowed,
}

impl ItemType {
    pub const ALL: [ItemType; 2] = [ItemType::Lent, ItemType::Borrowed];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Lent => "Lent",
            ItemType::Borrowed => "Borrowed",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lent" => Ok(ItemType::Lent),
            "borrowed" => Ok(ItemType::Borrowed),
            other => Err(LedgerError::Validation(format!(
                "Unknown item type \"{}\" (expected lent or borrowed)",
                other
            ))),
        }
    }
}

/// Priority of a wishlist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WishlistPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl WishlistPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            WishlistPriority::Low => "Low",
            WishlistPriority::Medium => "Medium",
            WishlistPriority::High => "High",
        }
    }
}

impl fmt::Display for WishlistPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WishlistPriority {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(WishlistPriority::Low),
            "medium" => Ok(WishlistPriority::Medium),
            "high" => Ok(WishlistPriority::High),
            other => Err(LedgerError::Validation(format!(
                "Unknown priority \"{}\" (expected low, medium or high)",
                other
            ))),
        }
    }
}

/// One lending or borrowing transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerItem {
    /// Unique identifier, assigned at creation
    pub id: Uuid,

    /// What was lent or borrowed
    pub name: String,

    /// Who it was lent to or borrowed from
    pub person: String,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// When the transaction was recorded
    pub date: DateTime<Utc>,

    /// Optional return deadline
    pub return_by_date: Option<DateTime<Utc>>,

    /// Soft-delete flag
    #[serde(default)]
    pub is_archived: bool,

    /// When the item was last archived; drives the retention sweep
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,

    pub condition_notes: Option<String>,

    /// Photo bytes, never interpreted
    #[serde(default, with = "base64_bytes", skip_serializing_if = "Option::is_none")]
    pub image_data: Option<Vec<u8>>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl LedgerItem {
    /// Whether the return deadline has passed at `now`.
    ///
    /// Archived items are never overdue.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        match self.return_by_date {
            Some(due) => !self.is_archived && now > due,
            None => false,
        }
    }

    /// Whether the return deadline has passed, against the wall clock.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now())
    }

    pub fn is_active(&self) -> bool {
        !self.is_archived
    }

    /// "To: Alex" for lent items, "From: Alex" for borrowed ones.
    pub fn counterparty_label(&self) -> String {
        match self.item_type {
            ItemType::Lent => format!("To: {}", self.person),
            ItemType::Borrowed => format!("From: {}", self.person),
        }
    }

    pub fn formatted_date(&self) -> String {
        format_medium_date(&self.date)
    }

    pub fn formatted_return_date(&self) -> Option<String> {
        self.return_by_date.as_ref().map(format_medium_date)
    }
}

/// Medium date style, e.g. "Jul 29, 2025".
pub fn format_medium_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Builder for creating new ledger items.
#[derive(Debug, Clone)]
pub struct NewLedgerItem {
    pub name: String,
    pub person: String,
    pub item_type: ItemType,
    pub return_by_date: Option<DateTime<Utc>>,
    pub condition_notes: Option<String>,
    pub image_data: Option<Vec<u8>>,
    pub tags: Vec<String>,
    /// Creation timestamp override; the store uses its clock when unset
    pub date: Option<DateTime<Utc>>,
}

impl NewLedgerItem {
    pub fn new(name: impl Into<String>, person: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            person: person.into(),
            item_type,
            return_by_date: None,
            condition_notes: None,
            image_data: None,
            tags: Vec::new(),
            date: None,
        }
    }

    pub fn with_return_by_date(mut self, date: DateTime<Utc>) -> Self {
        self.return_by_date = Some(date);
        self
    }

    pub fn with_condition_notes(mut self, notes: impl Into<String>) -> Self {
        self.condition_notes = Some(notes.into());
        self
    }

    pub fn with_image_data(mut self, data: Vec<u8>) -> Self {
        self.image_data = Some(data);
        self
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Validate and turn into a stored item.
    pub(crate) fn build(self, id: Uuid, now: DateTime<Utc>) -> Result<LedgerItem> {
        require_non_empty("Item name", &self.name)?;
        require_non_empty("Person", &self.person)?;
        let tags = normalize_tags(&self.tags)?;

        Ok(LedgerItem {
            id,
            name: self.name,
            person: self.person,
            item_type: self.item_type,
            date: self.date.unwrap_or(now),
            return_by_date: self.return_by_date,
            is_archived: false,
            archived_at: None,
            condition_notes: non_blank(self.condition_notes),
            image_data: self.image_data,
            tags,
        })
    }
}

/// Replacement values for the mutable fields of a ledger item.
///
/// Unset fields are left as they are. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct LedgerItemUpdate {
    pub name: Option<String>,
    pub person: Option<String>,
    pub item_type: Option<ItemType>,
    pub return_by_date: Option<Option<DateTime<Utc>>>,
    pub condition_notes: Option<Option<String>>,
    pub image_data: Option<Option<Vec<u8>>>,
    pub tags: Option<Vec<String>>,
}

impl LedgerItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn person(mut self, person: impl Into<String>) -> Self {
        self.person = Some(person.into());
        self
    }

    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn return_by_date(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.return_by_date = Some(date);
        self
    }

    pub fn condition_notes(mut self, notes: Option<String>) -> Self {
        self.condition_notes = Some(notes);
        self
    }

    pub fn image_data(mut self, data: Option<Vec<u8>>) -> Self {
        self.image_data = Some(data);
        self
    }

    pub fn tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.person.is_none()
            && self.item_type.is_none()
            && self.return_by_date.is_none()
            && self.condition_notes.is_none()
            && self.image_data.is_none()
            && self.tags.is_none()
    }

    /// Apply to `item`, returning whether any field changed. Validation
    /// happens before any field is touched.
    pub(crate) fn apply(self, item: &mut LedgerItem) -> Result<bool> {
        if let Some(ref name) = self.name {
            require_non_empty("Item name", name)?;
        }
        if let Some(ref person) = self.person {
            require_non_empty("Person", person)?;
        }
        let tags = self.tags.as_deref().map(normalize_tags).transpose()?;

        let mut changed = false;
        if let Some(name) = self.name {
            changed |= replace_if_changed(&mut item.name, name);
        }
        if let Some(person) = self.person {
            changed |= replace_if_changed(&mut item.person, person);
        }
        if let Some(item_type) = self.item_type {
            changed |= replace_if_changed(&mut item.item_type, item_type);
        }
        if let Some(date) = self.return_by_date {
            changed |= replace_if_changed(&mut item.return_by_date, date);
        }
        if let Some(notes) = self.condition_notes {
            changed |= replace_if_changed(&mut item.condition_notes, non_blank(notes));
        }
        if let Some(data) = self.image_data {
            changed |= replace_if_changed(&mut item.image_data, data);
        }
        if let Some(tags) = tags {
            changed |= replace_if_changed(&mut item.tags, tags);
        }
        Ok(changed)
    }
}

/// Something the user would like to own or borrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Non-negative currency amount
    pub estimated_price: Option<f64>,
    #[serde(default)]
    pub priority: WishlistPriority,
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl WishlistItem {
    /// Price with two decimals, e.g. "$24.99".
    pub fn formatted_price(&self) -> Option<String> {
        self.estimated_price.map(|price| format!("${:.2}", price))
    }
}

/// Builder for creating new wishlist items.
#[derive(Debug, Clone)]
pub struct NewWishlistItem {
    pub name: String,
    pub description: Option<String>,
    pub estimated_price: Option<f64>,
    pub priority: WishlistPriority,
    pub date_added: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl NewWishlistItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            estimated_price: None,
            priority: WishlistPriority::default(),
            date_added: None,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_estimated_price(mut self, price: f64) -> Self {
        self.estimated_price = Some(price);
        self
    }

    pub fn with_priority(mut self, priority: WishlistPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_date_added(mut self, date: DateTime<Utc>) -> Self {
        self.date_added = Some(date);
        self
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn build(self, id: Uuid, now: DateTime<Utc>) -> Result<WishlistItem> {
        require_non_empty("Wishlist item name", &self.name)?;
        validate_price(self.estimated_price)?;
        let tags = normalize_tags(&self.tags)?;

        Ok(WishlistItem {
            id,
            name: self.name,
            description: non_blank(self.description),
            estimated_price: self.estimated_price,
            priority: self.priority,
            date_added: self.date_added.unwrap_or(now),
            tags,
        })
    }
}

/// Replacement values for the mutable fields of a wishlist item.
#[derive(Debug, Clone, Default)]
pub struct WishlistItemUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub estimated_price: Option<Option<f64>>,
    pub priority: Option<WishlistPriority>,
    pub tags: Option<Vec<String>>,
}

impl WishlistItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn estimated_price(mut self, price: Option<f64>) -> Self {
        self.estimated_price = Some(price);
        self
    }

    pub fn priority(mut self, priority: WishlistPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.estimated_price.is_none()
            && self.priority.is_none()
            && self.tags.is_none()
    }

    pub(crate) fn apply(self, item: &mut WishlistItem) -> Result<bool> {
        if let Some(ref name) = self.name {
            require_non_empty("Wishlist item name", name)?;
        }
        if let Some(price) = self.estimated_price {
            validate_price(price)?;
        }
        let tags = self.tags.as_deref().map(normalize_tags).transpose()?;

        let mut changed = false;
        if let Some(name) = self.name {
            changed |= replace_if_changed(&mut item.name, name);
        }
        if let Some(description) = self.description {
            changed |= replace_if_changed(&mut item.description, non_blank(description));
        }
        if let Some(price) = self.estimated_price {
            changed |= replace_if_changed(&mut item.estimated_price, price);
        }
        if let Some(priority) = self.priority {
            changed |= replace_if_changed(&mut item.priority, priority);
        }
        if let Some(tags) = tags {
            changed |= replace_if_changed(&mut item.tags, tags);
        }
        Ok(changed)
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn validate_price(price: Option<f64>) -> Result<()> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(LedgerError::Validation(format!(
            "Estimated price must be a non-negative amount, got {}",
            p
        ))),
        _ => Ok(()),
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Serde adapter storing optional binary blobs as base64 text.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|text| STANDARD.decode(text.as_bytes()).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    fn sample() -> LedgerItem {
        NewLedgerItem::new("The Hobbit", "Alex", ItemType::Lent)
            .with_tags(["Books", "fiction"])
            .build(Uuid::new_v4(), at(2025, 7, 29))
            .unwrap()
    }

    #[test]
    fn test_build_sets_defaults() {
        let item = sample();
        assert_eq!(item.date, at(2025, 7, 29));
        assert!(!item.is_archived);
        assert!(item.archived_at.is_none());
        assert_eq!(item.tags, vec!["books", "fiction"]);
    }

    #[test]
    fn test_build_rejects_blank_person() {
        let err = NewLedgerItem::new("Drill", "  ", ItemType::Borrowed)
            .build(Uuid::new_v4(), at(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_overdue_rules() {
        let now = at(2025, 8, 10);
        let mut item = sample();
        assert!(!item.is_overdue_at(now), "no deadline means never overdue");

        item.return_by_date = Some(now - Duration::days(1));
        assert!(item.is_overdue_at(now));

        item.is_archived = true;
        assert!(!item.is_overdue_at(now), "archived items are never overdue");

        item.is_archived = false;
        item.return_by_date = Some(now + Duration::hours(1));
        assert!(!item.is_overdue_at(now));
    }

    #[test]
    fn test_counterparty_label() {
        let mut item = sample();
        assert_eq!(item.counterparty_label(), "To: Alex");
        item.item_type = ItemType::Borrowed;
        assert_eq!(item.counterparty_label(), "From: Alex");
    }

    #[test]
    fn test_formatted_dates() {
        let mut item = sample();
        assert_eq!(item.formatted_date(), "Jul 29, 2025");
        assert_eq!(item.formatted_return_date(), None);
        item.return_by_date = Some(at(2025, 8, 5));
        assert_eq!(item.formatted_return_date().as_deref(), Some("Aug 5, 2025"));
    }

    #[test]
    fn test_update_validates_before_applying() {
        let mut item = sample();
        let before = item.clone();
        let err = LedgerItemUpdate::new()
            .person("Sam")
            .name("")
            .apply(&mut item)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(item, before);
    }

    #[test]
    fn test_update_clears_optional_fields() {
        let mut item = sample();
        item.condition_notes = Some("scuffed".to_string());
        let changed = LedgerItemUpdate::new()
            .condition_notes(None)
            .tags(["Loaned"])
            .apply(&mut item)
            .unwrap();
        assert!(changed);
        assert_eq!(item.condition_notes, None);
        assert_eq!(item.tags, vec!["loaned"]);
    }

    #[test]
    fn test_update_with_same_values_reports_no_change() {
        let mut item = sample();
        let name = item.name.clone();
        let tags: Vec<String> = item.tags.iter().map(|t| t.to_uppercase()).collect();
        let changed = LedgerItemUpdate::new()
            .name(name)
            .tags(tags)
            .apply(&mut item)
            .unwrap();
        assert!(!changed);
        assert!(!LedgerItemUpdate::new().apply(&mut item).unwrap());
    }

    #[test]
    fn test_item_type_parsing() {
        assert_eq!("lent".parse::<ItemType>().unwrap(), ItemType::Lent);
        assert_eq!("Borrowed".parse::<ItemType>().unwrap(), ItemType::Borrowed);
        assert!("gifted".parse::<ItemType>().is_err());
    }

    #[test]
    fn test_wishlist_defaults_and_price() {
        let item = NewWishlistItem::new("Kayak")
            .with_estimated_price(349.5)
            .build(Uuid::new_v4(), at(2025, 3, 1))
            .unwrap();
        assert_eq!(item.priority, WishlistPriority::Medium);
        assert_eq!(item.date_added, at(2025, 3, 1));
        assert_eq!(item.formatted_price().as_deref(), Some("$349.50"));
    }

    #[test]
    fn test_wishlist_rejects_negative_price() {
        let err = NewWishlistItem::new("Tent")
            .with_estimated_price(-1.0)
            .build(Uuid::new_v4(), at(2025, 3, 1))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_image_data_serializes_as_base64() {
        let mut item = sample();
        item.image_data = Some(vec![0x89, 0x50, 0x4E, 0x47]);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["image_data"], "iVBORw==");
        assert_eq!(json["type"], "Lent");

        let back: LedgerItem = serde_json::from_value(json).unwrap();
        assert_eq!(back.image_data, Some(vec![0x89, 0x50, 0x4E, 0x47]));
    }
}
