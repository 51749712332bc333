//! # Record Persistence
//!
//! Collection-oriented storage for JSON records. Every record is an
//! object keyed by its own `id` field; saving a record with an existing
//! id replaces it.
//!
//! The trait keeps the credential stack independent of where records
//! live. The in-memory implementation here covers tests and
//! single-process holders; a host wanting durable storage implements
//! the same trait over its database.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;

use crate::error::WalletError;

/// Collection-oriented JSON record storage.
pub trait RecordStore: Send + Sync {
    /// Insert or replace a record in a collection, returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::MissingRecordId`] if the record has no
    /// string `id` field.
    fn save(&self, collection: &str, record: serde_json::Value) -> Result<String, WalletError>;

    /// Fetch one record by id.
    fn get(&self, collection: &str, id: &str) -> Result<Option<serde_json::Value>, WalletError>;

    /// Fetch every record in a collection, ordered by id.
    fn get_all(&self, collection: &str) -> Result<Vec<serde_json::Value>, WalletError>;

    /// Remove a record. Returns whether a record was present.
    fn delete(&self, collection: &str, id: &str) -> Result<bool, WalletError>;
}

fn record_id(record: &serde_json::Value) -> Result<String, WalletError> {
    record
        .get("id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or(WalletError::MissingRecordId)
}

/// In-memory [`RecordStore`].
///
/// Collections are created lazily on first save. Contents vanish with
/// the process.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, serde_json::Value>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn save(&self, collection: &str, record: serde_json::Value) -> Result<String, WalletError> {
        let id = record_id(&record)?;
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), record);
        Ok(id)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<serde_json::Value>, WalletError> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned())
    }

    fn get_all(&self, collection: &str) -> Result<Vec<serde_json::Value>, WalletError> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<bool, WalletError> {
        Ok(self
            .collections
            .write()
            .get_mut(collection)
            .map(|records| records.remove(id).is_some())
            .unwrap_or(false))
    }
}
