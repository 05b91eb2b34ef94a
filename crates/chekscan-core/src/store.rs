//! Receipt storage
//!
//! Receipts live in an in-process collection, optionally mirrored to a JSON
//! file (an array of receipts, rewritten in full on every mutation — the
//! original flat-file layout). The store is a cheap-to-clone handle; the
//! mutex serializes read-modify-write so id assignment never races.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{DraftReceipt, Receipt};

/// Shared receipt store handle
#[derive(Clone)]
pub struct ReceiptStore {
    receipts: Arc<Mutex<Vec<Receipt>>>,
    path: Option<PathBuf>,
}

impl ReceiptStore {
    /// Store with no persistence; contents are lost on restart
    pub fn in_memory() -> Self {
        Self {
            receipts: Arc::new(Mutex::new(Vec::new())),
            path: None,
        }
    }

    /// File-backed store. Loads the existing receipt array if the file
    /// exists; a missing file starts empty, a malformed one is an error.
    pub fn open(path: &Path) -> Result<Self> {
        let receipts = if path.exists() {
            let contents = fs::read_to_string(path)?;
            serde_json::from_str::<Vec<Receipt>>(&contents)?
        } else {
            Vec::new()
        };
        info!(path = %path.display(), count = receipts.len(), "Opened receipt store");

        Ok(Self {
            receipts: Arc::new(Mutex::new(receipts)),
            path: Some(path.to_path_buf()),
        })
    }

    /// The backing file path, if this store is file-backed
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Persist a draft: assign the next id, stamp the scan time, and insert
    /// at the front (newest first).
    ///
    /// Ids are unique and monotonically increasing even across deletions.
    /// On a write failure the insert is rolled back so memory and file stay
    /// consistent.
    pub fn add(&self, draft: DraftReceipt) -> Result<Receipt> {
        let mut receipts = self.lock()?;

        let id = receipts.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let receipt = Receipt::from_draft(draft, id, Utc::now().to_rfc3339());
        receipts.insert(0, receipt.clone());

        if let Err(e) = self.persist(&receipts) {
            receipts.remove(0);
            return Err(e);
        }

        debug!(id = id, merchant = %receipt.merchant_name, "Stored receipt");
        Ok(receipt)
    }

    /// All stored receipts, newest first
    pub fn list(&self) -> Result<Vec<Receipt>> {
        Ok(self.lock()?.clone())
    }

    /// Remove the receipt with the given id. Idempotent: deleting an id
    /// that does not exist is a no-op. Returns whether anything was removed.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let mut receipts = self.lock()?;

        let before = receipts.len();
        receipts.retain(|r| r.id != id);
        let removed = receipts.len() != before;

        if removed {
            self.persist(&receipts)?;
            debug!(id = id, "Deleted receipt");
        }

        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Receipt>>> {
        self.receipts
            .lock()
            .map_err(|_| Error::Store("Failed to acquire receipt store lock".into()))
    }

    /// Full rewrite of the backing file (no-op for in-memory stores)
    fn persist(&self, receipts: &[Receipt]) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(receipts)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, LineItem};

    fn draft(merchant: &str) -> DraftReceipt {
        DraftReceipt {
            source_url: "http://ofd.example/check/1".into(),
            merchant_name: merchant.into(),
            receipt_number: "12345".into(),
            date_time: "21.05.2024 14:30".into(),
            items: vec![LineItem {
                name: "Cola 1.5L".into(),
                quantity: "2".into(),
                price_text: "12000".into(),
                price_value: 12000.0,
                category: Category::Beverages,
            }],
            total_text: "12000".into(),
        }
    }

    #[test]
    fn test_add_assigns_incrementing_ids() {
        let store = ReceiptStore::in_memory();
        let first = store.add(draft("A")).unwrap();
        let second = store.add(draft("B")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!second.scanned_at.is_empty());
    }

    #[test]
    fn test_newest_first_ordering() {
        let store = ReceiptStore::in_memory();
        store.add(draft("A")).unwrap();
        store.add(draft("B")).unwrap();

        let receipts = store.list().unwrap();
        assert_eq!(receipts[0].merchant_name, "B");
        assert_eq!(receipts[1].merchant_name, "A");
    }

    #[test]
    fn test_ids_stay_unique_after_delete() {
        let store = ReceiptStore::in_memory();
        store.add(draft("A")).unwrap();
        let b = store.add(draft("B")).unwrap();
        store.delete(1).unwrap();

        let c = store.add(draft("C")).unwrap();
        assert_ne!(c.id, b.id);
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = ReceiptStore::in_memory();
        store.add(draft("A")).unwrap();

        assert!(store.delete(1).unwrap());
        assert!(!store.delete(1).unwrap());
        assert!(!store.delete(99).unwrap());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_delete_missing_id_leaves_collection_unchanged() {
        let store = ReceiptStore::in_memory();
        store.add(draft("A")).unwrap();

        let before = store.list().unwrap();
        assert!(!store.delete(42).unwrap());
        let after = store.list().unwrap();

        assert_eq!(before.len(), after.len());
        assert_eq!(before[0].id, after[0].id);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipts.json");

        {
            let store = ReceiptStore::open(&path).unwrap();
            store.add(draft("Korzinka")).unwrap();
            store.add(draft("Makro")).unwrap();
        }

        let reopened = ReceiptStore::open(&path).unwrap();
        let receipts = reopened.list().unwrap();
        assert_eq!(receipts.len(), 2);
        assert_eq!(receipts[0].merchant_name, "Makro");
        assert_eq!(receipts[0].items[0].category, Category::Beverages);
    }

    #[test]
    fn test_file_store_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let store = ReceiptStore::open(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipts.json");
        fs::write(&path, "not json").unwrap();

        assert!(ReceiptStore::open(&path).is_err());
    }

    #[test]
    fn test_file_persists_after_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipts.json");

        let store = ReceiptStore::open(&path).unwrap();
        store.add(draft("A")).unwrap();
        store.add(draft("B")).unwrap();
        store.delete(1).unwrap();

        let reopened = ReceiptStore::open(&path).unwrap();
        let receipts = reopened.list().unwrap();
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].id, 2);
    }
}
