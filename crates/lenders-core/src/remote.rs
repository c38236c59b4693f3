//! Remote sync boundary.
//!
//! [`RemoteStore`] is the seam for any record-oriented backend. The
//! in-tree implementation, [`DirectoryRemoteStore`], keeps one JSON record
//! per item under a directory (a synced folder, a mounted share) with image
//! bytes stored as separate attachment files.
//!
//! Layout:
//!
//! ```text
//! <root>/ledger/<record-id>.json
//! <root>/ledger/assets/<record-id>.bin
//! <root>/wishlist/<record-id>.json
//! <root>/zones/SharedLedger/share.json
//! ```
//!
//! Remote failures are reported as `LedgerError::RemoteOperationFailure`
//! and never touch local state.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LedgerError, Result};
use crate::fs::write_atomic;
use crate::model::{ItemType, LedgerItem, WishlistItem, WishlistPriority};

/// Zone that shared items are copied into.
pub const SHARE_ZONE_NAME: &str = "SharedLedger";
/// Title given to every share.
pub const SHARE_TITLE: &str = "Shared Ledger Items";

const LEDGER_DIR: &str = "ledger";
const WISHLIST_DIR: &str = "wishlist";
const ASSETS_DIR: &str = "assets";
const ZONES_DIR: &str = "zones";
const SHARE_FILE: &str = "share.json";

/// Identifier the remote assigns to a saved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of sharing a set of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareHandle {
    pub zone: String,
    pub title: String,
    pub record_ids: Vec<RecordId>,
    /// Where the share lives, in backend terms (a path for directories).
    pub location: String,
}

/// A record-oriented remote backend.
pub trait RemoteStore {
    /// Save an item, replacing any earlier record of the same item.
    fn save_item(&self, item: &LedgerItem) -> Result<RecordId>;

    /// Fetch every readable item record. Unreadable records are skipped.
    fn fetch_items(&self) -> Result<Vec<LedgerItem>>;

    fn save_wishlist_item(&self, item: &WishlistItem) -> Result<RecordId>;

    fn fetch_wishlist_items(&self) -> Result<Vec<WishlistItem>>;

    /// Copy name, person, type and date of `items` into the share zone.
    fn share_items(&self, items: &[LedgerItem]) -> Result<ShareHandle>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord {
    record_id: RecordId,
    item_id: Uuid,
    name: String,
    person: String,
    #[serde(rename = "type")]
    item_type: ItemType,
    date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    return_by_date: Option<DateTime<Utc>>,
    #[serde(default)]
    is_archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    archived_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition_notes: Option<String>,
    /// Attachment file name relative to the assets directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_asset: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WishlistRecord {
    record_id: RecordId,
    item_id: Uuid,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimated_price: Option<f64>,
    #[serde(default)]
    priority: WishlistPriority,
    date_added: DateTime<Utc>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharedRecord {
    record_id: RecordId,
    name: String,
    person: String,
    #[serde(rename = "type")]
    item_type: ItemType,
    date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareManifest {
    title: String,
    records: Vec<SharedRecord>,
}

/// Directory-backed remote store.
#[derive(Debug, Clone)]
pub struct DirectoryRemoteStore {
    root: PathBuf,
}

impl DirectoryRemoteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ledger_dir(&self) -> PathBuf {
        self.root.join(LEDGER_DIR)
    }

    fn assets_dir(&self) -> PathBuf {
        self.ledger_dir().join(ASSETS_DIR)
    }

    fn wishlist_dir(&self) -> PathBuf {
        self.root.join(WISHLIST_DIR)
    }

    fn zone_dir(&self) -> PathBuf {
        self.root.join(ZONES_DIR).join(SHARE_ZONE_NAME)
    }

    fn record_path(dir: &Path, record_id: RecordId) -> PathBuf {
        dir.join(format!("{}.json", record_id))
    }

    /// Record id already holding `item_id`, or a fresh one.
    fn record_id_for<R>(dir: &Path, item_id: Uuid, key: impl Fn(&R) -> (RecordId, Uuid)) -> Result<RecordId>
    where
        R: DeserializeOwned,
    {
        for (_, record) in read_records::<R>(dir)? {
            let (record_id, existing) = key(&record);
            if existing == item_id {
                return Ok(record_id);
            }
        }
        Ok(RecordId(Uuid::new_v4()))
    }

    fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
        let bytes =
            serde_json::to_vec_pretty(record).map_err(|e| remote_error("encode record", e))?;
        write_atomic(path, &bytes).map_err(|e| remote_error("write record", e))
    }
}

impl RemoteStore for DirectoryRemoteStore {
    fn save_item(&self, item: &LedgerItem) -> Result<RecordId> {
        let dir = self.ledger_dir();
        let record_id = Self::record_id_for(&dir, item.id, |r: &ItemRecord| (r.record_id, r.item_id))?;

        let asset_path = self.assets_dir().join(format!("{}.bin", record_id));
        let image_asset = match &item.image_data {
            Some(bytes) => {
                write_atomic(&asset_path, bytes).map_err(|e| remote_error("write attachment", e))?;
                Some(format!("{}.bin", record_id))
            }
            None => {
                if let Err(e) = fs::remove_file(&asset_path) {
                    if e.kind() != io::ErrorKind::NotFound {
                        return Err(remote_error("remove attachment", e));
                    }
                }
                None
            }
        };

        let record = ItemRecord {
            record_id,
            item_id: item.id,
            name: item.name.clone(),
            person: item.person.clone(),
            item_type: item.item_type,
            date: item.date,
            return_by_date: item.return_by_date,
            is_archived: item.is_archived,
            archived_at: item.archived_at,
            condition_notes: item.condition_notes.clone(),
            image_asset,
            tags: item.tags.clone(),
        };
        Self::write_record(&Self::record_path(&dir, record_id), &record)?;
        tracing::debug!(%record_id, item = %item.id, "saved remote item record");
        Ok(record_id)
    }

    fn fetch_items(&self) -> Result<Vec<LedgerItem>> {
        let assets = self.assets_dir();
        let mut items: Vec<LedgerItem> = read_records::<ItemRecord>(&self.ledger_dir())?
            .into_iter()
            .map(|(_, record)| {
                let image_data = record.image_asset.as_ref().and_then(|asset| {
                    let path = assets.join(asset);
                    match fs::read(&path) {
                        Ok(bytes) => Some(bytes),
                        Err(e) => {
                            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable attachment");
                            None
                        }
                    }
                });
                LedgerItem {
                    id: record.item_id,
                    name: record.name,
                    person: record.person,
                    item_type: record.item_type,
                    date: record.date,
                    return_by_date: record.return_by_date,
                    is_archived: record.is_archived,
                    archived_at: record.archived_at,
                    condition_notes: record.condition_notes,
                    image_data,
                    tags: record.tags,
                }
            })
            .collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(items)
    }

    fn save_wishlist_item(&self, item: &WishlistItem) -> Result<RecordId> {
        let dir = self.wishlist_dir();
        let record_id =
            Self::record_id_for(&dir, item.id, |r: &WishlistRecord| (r.record_id, r.item_id))?;
        let record = WishlistRecord {
            record_id,
            item_id: item.id,
            name: item.name.clone(),
            item_description: item.description.clone(),
            estimated_price: item.estimated_price,
            priority: item.priority,
            date_added: item.date_added,
            tags: item.tags.clone(),
        };
        Self::write_record(&Self::record_path(&dir, record_id), &record)?;
        tracing::debug!(%record_id, item = %item.id, "saved remote wishlist record");
        Ok(record_id)
    }

    fn fetch_wishlist_items(&self) -> Result<Vec<WishlistItem>> {
        let mut items: Vec<WishlistItem> = read_records::<WishlistRecord>(&self.wishlist_dir())?
            .into_iter()
            .map(|(_, record)| WishlistItem {
                id: record.item_id,
                name: record.name,
                description: record.item_description,
                estimated_price: record.estimated_price,
                priority: record.priority,
                date_added: record.date_added,
                tags: record.tags,
            })
            .collect();
        items.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        Ok(items)
    }

    fn share_items(&self, items: &[LedgerItem]) -> Result<ShareHandle> {
        if items.is_empty() {
            return Err(LedgerError::RemoteOperationFailure(
                "Nothing to share".to_string(),
            ));
        }

        let zone = self.zone_dir();
        let records: Vec<SharedRecord> = items
            .iter()
            .map(|item| SharedRecord {
                record_id: RecordId(Uuid::new_v4()),
                name: item.name.clone(),
                person: item.person.clone(),
                item_type: item.item_type,
                date: item.date,
            })
            .collect();
        let record_ids = records.iter().map(|r| r.record_id).collect();
        let manifest = ShareManifest {
            title: SHARE_TITLE.to_string(),
            records,
        };
        Self::write_record(&zone.join(SHARE_FILE), &manifest)?;
        tracing::info!(zone = %zone.display(), count = items.len(), "shared items");

        Ok(ShareHandle {
            zone: SHARE_ZONE_NAME.to_string(),
            title: SHARE_TITLE.to_string(),
            record_ids,
            location: zone.display().to_string(),
        })
    }
}

/// Parse every `*.json` record in `dir`, skipping unreadable ones.
/// A missing directory means no records yet.
fn read_records<R: DeserializeOwned>(dir: &Path) -> Result<Vec<(PathBuf, R)>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(remote_error("list records", e)),
    };

    let mut records = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| remote_error("list records", e))?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let parsed = fs::read(&path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| serde_json::from_slice::<R>(&bytes).map_err(|e| e.to_string()));
        match parsed {
            Ok(record) => records.push((path, record)),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping unreadable remote record");
            }
        }
    }
    Ok(records)
}

fn remote_error(action: &str, err: impl fmt::Display) -> LedgerError {
    LedgerError::RemoteOperationFailure(format!("{} failed: {}", action, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn item(name: &str, image: Option<Vec<u8>>) -> LedgerItem {
        LedgerItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            person: "Alice".to_string(),
            item_type: ItemType::Lent,
            date: Utc.with_ymd_and_hms(2025, 7, 29, 10, 0, 0).unwrap(),
            return_by_date: None,
            is_archived: false,
            archived_at: None,
            condition_notes: Some("scuffed".to_string()),
            image_data: image,
            tags: vec!["books".to_string()],
        }
    }

    fn json_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|x| x == "json"))
            .count()
    }

    #[test]
    fn test_unencodable_record_is_a_remote_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.json");
        let mut record = std::collections::HashMap::new();
        record.insert((1u8, 2u8), "non-string keys are not JSON");

        let err = DirectoryRemoteStore::write_record(&path, &record).unwrap_err();
        assert!(matches!(err, LedgerError::RemoteOperationFailure(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_fetch_keeps_image_as_attachment() {
        let dir = tempdir().unwrap();
        let remote = DirectoryRemoteStore::new(dir.path());
        let original = item("Book", Some(vec![0x89, 0x50, 0x4E, 0x47]));

        let record_id = remote.save_item(&original).unwrap();

        let asset = dir.path().join("ledger/assets").join(format!("{}.bin", record_id));
        assert_eq!(fs::read(asset).unwrap(), vec![0x89, 0x50, 0x4E, 0x47]);
        let record = fs::read_to_string(dir.path().join("ledger").join(format!("{}.json", record_id))).unwrap();
        assert!(!record.contains("iVBORw"));

        let fetched = remote.fetch_items().unwrap();
        assert_eq!(fetched, vec![original]);
    }

    #[test]
    fn test_resave_overwrites_record() {
        let dir = tempdir().unwrap();
        let remote = DirectoryRemoteStore::new(dir.path());
        let mut original = item("Book", Some(vec![1]));

        let first = remote.save_item(&original).unwrap();
        original.name = "Better Book".to_string();
        original.image_data = None;
        let second = remote.save_item(&original).unwrap();

        assert_eq!(first, second);
        assert_eq!(json_files(&dir.path().join("ledger")), 1);
        let fetched = remote.fetch_items().unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].name, "Better Book");
        assert!(fetched[0].image_data.is_none());
    }

    #[test]
    fn test_fetch_skips_unreadable_records() {
        let dir = tempdir().unwrap();
        let remote = DirectoryRemoteStore::new(dir.path());
        remote.save_item(&item("Good", None)).unwrap();
        fs::write(dir.path().join("ledger/broken.json"), "{ nope").unwrap();
        fs::write(
            dir.path().join("ledger/wrong-type.json"),
            r#"{"recordId":"00000000-0000-0000-0000-000000000000","itemId":"00000000-0000-0000-0000-000000000000","name":"x","person":"y","type":"Gifted","date":"2025-07-29T10:00:00Z"}"#,
        )
        .unwrap();

        let fetched = remote.fetch_items().unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].name, "Good");
    }

    #[test]
    fn test_fetch_from_empty_root() {
        let dir = tempdir().unwrap();
        let remote = DirectoryRemoteStore::new(dir.path().join("never-created"));
        assert!(remote.fetch_items().unwrap().is_empty());
        assert!(remote.fetch_wishlist_items().unwrap().is_empty());
    }

    #[test]
    fn test_wishlist_round_trip() {
        let dir = tempdir().unwrap();
        let remote = DirectoryRemoteStore::new(dir.path());
        let wish = WishlistItem {
            id: Uuid::new_v4(),
            name: "Kayak".to_string(),
            description: Some("two seats".to_string()),
            estimated_price: Some(349.99),
            priority: WishlistPriority::High,
            date_added: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
            tags: vec!["outdoor".to_string()],
        };

        remote.save_wishlist_item(&wish).unwrap();
        remote.save_wishlist_item(&wish).unwrap();

        assert_eq!(remote.fetch_wishlist_items().unwrap(), vec![wish]);
    }

    #[test]
    fn test_share_items_writes_reduced_records() {
        let dir = tempdir().unwrap();
        let remote = DirectoryRemoteStore::new(dir.path());

        let handle = remote
            .share_items(&[item("Book", Some(vec![9])), item("Lamp", None)])
            .unwrap();

        assert_eq!(handle.zone, "SharedLedger");
        assert_eq!(handle.title, "Shared Ledger Items");
        assert_eq!(handle.record_ids.len(), 2);
        let manifest = fs::read_to_string(dir.path().join("zones/SharedLedger/share.json")).unwrap();
        assert!(manifest.contains("\"Lamp\""));
        assert!(!manifest.contains("scuffed"));
        assert!(!manifest.contains("books"));
    }

    #[test]
    fn test_share_nothing_fails() {
        let dir = tempdir().unwrap();
        let remote = DirectoryRemoteStore::new(dir.path());
        assert!(matches!(
            remote.share_items(&[]),
            Err(LedgerError::RemoteOperationFailure(_))
        ));
    }

    #[test]
    fn test_unwritable_root_is_remote_failure() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let remote = DirectoryRemoteStore::new(&blocker);

        assert!(matches!(
            remote.save_item(&item("Book", None)),
            Err(LedgerError::RemoteOperationFailure(_))
        ));
    }
}
