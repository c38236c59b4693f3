//! An open ledger: the loaded store plus its change feed.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use chrono::Duration;

use lenders_core::{
    load_snapshot, save_snapshot, LedgerError, LedgerStore, StoreEvent, SystemClock,
    TracingObserver,
};

use crate::errors::CliError;

use super::resolver::{missing_ledger_message, INIT_HINT};

/// A ledger loaded from disk. Mutations go through `store_mut`, and
/// `save` writes the snapshot back only if the store reported a change.
pub struct LedgerSession {
    path: PathBuf,
    store: LedgerStore,
    events: Receiver<StoreEvent>,
    purged: usize,
}

impl LedgerSession {
    /// Load the snapshot at `path` and sweep expired archives.
    pub fn open(path: PathBuf, retention: Option<Duration>) -> anyhow::Result<Self> {
        let snapshot = match load_snapshot(&path) {
            Ok(snapshot) => snapshot,
            Err(LedgerError::NotFound(_)) => {
                return Err(CliError::not_found(missing_ledger_message(&path), INIT_HINT).into())
            }
            Err(err) => return Err(err.into()),
        };

        let mut store = LedgerStore::from_snapshot(snapshot, SystemClock);
        store.subscribe(TracingObserver);
        let (_, events) = store.subscribe_channel();

        let mut session = Self {
            path,
            store,
            events,
            purged: 0,
        };

        if let Some(retention) = retention {
            let purged = session.store.purge_expired_archives(retention);
            if !purged.is_empty() {
                session.purged = purged.len();
                session.save()?;
            }
        }

        Ok(session)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut LedgerStore {
        &mut self.store
    }

    /// Items removed by the sweep when the ledger was opened.
    pub fn purged_on_open(&self) -> usize {
        self.purged
    }

    /// Persist pending changes. Returns whether anything was written.
    pub fn save(&mut self) -> anyhow::Result<bool> {
        let changes = self.events.try_iter().count();
        if changes == 0 {
            return Ok(false);
        }
        save_snapshot(&self.path, &self.store.snapshot())?;
        tracing::debug!(path = %self.path.display(), changes, "ledger saved");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lenders_core::{ItemType, NewLedgerItem};
    use tempfile::tempdir;

    fn init_ledger(path: &Path) {
        save_snapshot(path, &LedgerStore::new().snapshot()).unwrap();
    }

    #[test]
    fn test_missing_ledger_is_not_found() {
        let dir = tempdir().unwrap();
        let err = LedgerSession::open(dir.path().join("ledger.json"), None)
            .err()
            .unwrap();
        let cli = err.downcast_ref::<CliError>().unwrap();
        assert!(matches!(cli, CliError::NotFound { .. }));
    }

    #[test]
    fn test_save_only_writes_after_a_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        init_ledger(&path);

        let mut session = LedgerSession::open(path.clone(), None).unwrap();
        assert!(!session.save().unwrap());

        session
            .store_mut()
            .add_item(NewLedgerItem::new("Drill", "Sam", ItemType::Borrowed))
            .unwrap();
        assert!(session.save().unwrap());
        assert!(!session.save().unwrap());

        let reopened = LedgerSession::open(path, None).unwrap();
        assert_eq!(reopened.store().items().len(), 1);
    }

    #[test]
    fn test_open_sweeps_old_archives() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        init_ledger(&path);

        let mut session = LedgerSession::open(path.clone(), None).unwrap();
        let id = session
            .store_mut()
            .add_item(NewLedgerItem::new("Lamp", "Kim", ItemType::Lent))
            .unwrap();
        session.store_mut().archive_items(&[id]);
        session.save().unwrap();

        // a zero retention makes every archived item expired
        let reopened = LedgerSession::open(path.clone(), Some(Duration::zero())).unwrap();
        assert_eq!(reopened.purged_on_open(), 1);
        assert!(reopened.store().items().is_empty());

        let again = LedgerSession::open(path, None).unwrap();
        assert!(again.store().items().is_empty());
    }
}
