//! Record Store Seam and In-Memory Implementation

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::StorageError;

/// Persistent key-value store seam. Records are keyed by device id plus
/// timestamp; writing the same key twice replaces the earlier record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put_record(&self, record: Value) -> Result<(), StorageError>;
}

/// In-memory store used in tests and development
pub struct InMemoryStore {
    records: Mutex<Vec<Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything stored so far
    pub fn records(&self) -> Vec<Value> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn put_record(&self, record: Value) -> Result<(), StorageError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| StorageError::DatabaseError(format!("Lock error: {}", e)))?;

        records.push(record);
        debug!("Stored record ({} total)", records.len());
        Ok(())
    }
}
