//! Shareable transfer records for handing an item to another ledger.
//!
//! The record is a privacy-reduced projection of a [`LedgerItem`]: it never
//! carries the item id, archive state or photo. The text form is compact
//! JSON with a fixed field order, suitable as a scannable-code payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LedgerError, Result};
use crate::model::{ItemType, LedgerItem, NewLedgerItem};
use crate::tags::normalize_tags;

/// Wire shape of a shared item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub name: String,
    pub person: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_by_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_notes: Option<String>,
    pub tags: Vec<String>,
}

impl From<&LedgerItem> for TransferRecord {
    fn from(item: &LedgerItem) -> Self {
        Self {
            name: item.name.clone(),
            person: item.person.clone(),
            item_type: item.item_type,
            date: item.date,
            return_by_date: item.return_by_date,
            condition_notes: item.condition_notes.clone(),
            tags: item.tags.clone(),
        }
    }
}

impl TransferRecord {
    /// Parse and validate transfer text.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedTransferRecord` if the text is not a
    /// record of the expected shape, names an unknown item type, has an
    /// empty name or person, or carries invalid tags.
    pub fn parse(text: &str) -> Result<Self> {
        let mut record: TransferRecord = serde_json::from_str(text.trim())
            .map_err(|e| LedgerError::MalformedTransferRecord(e.to_string()))?;

        if record.name.trim().is_empty() {
            return Err(LedgerError::MalformedTransferRecord(
                "item name is empty".to_string(),
            ));
        }
        if record.person.trim().is_empty() {
            return Err(LedgerError::MalformedTransferRecord(
                "person is empty".to_string(),
            ));
        }
        record.tags = normalize_tags(&record.tags)
            .map_err(|e| LedgerError::MalformedTransferRecord(e.to_string()))?;

        Ok(record)
    }

    /// Serialize to the compact text form.
    pub fn to_text(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Turn into a builder for the scan-and-accept flow, keeping the
    /// original transaction date.
    pub fn into_new_item(self) -> NewLedgerItem {
        let mut new_item =
            NewLedgerItem::new(self.name, self.person, self.item_type).with_tags(self.tags);
        new_item.date = Some(self.date);
        new_item.return_by_date = self.return_by_date;
        new_item.condition_notes = self.condition_notes;
        new_item
    }

    /// Build a brand-new item: fresh id, active, no image.
    pub fn into_ledger_item(self) -> LedgerItem {
        LedgerItem {
            id: Uuid::new_v4(),
            name: self.name,
            person: self.person,
            item_type: self.item_type,
            date: self.date,
            return_by_date: self.return_by_date,
            is_archived: false,
            archived_at: None,
            condition_notes: self.condition_notes,
            image_data: None,
            tags: self.tags,
        }
    }
}

/// Encode an item as transfer text.
pub fn encode(item: &LedgerItem) -> Result<String> {
    TransferRecord::from(item).to_text()
}

/// Decode transfer text into a new, unsaved ledger item.
///
/// # Errors
///
/// Returns `LedgerError::MalformedTransferRecord` for anything that is not
/// a valid transfer record. Unknown item types are rejected rather than
/// defaulted.
pub fn decode(text: &str) -> Result<LedgerItem> {
    TransferRecord::parse(text).map(TransferRecord::into_ledger_item)
}
