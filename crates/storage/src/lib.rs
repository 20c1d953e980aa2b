//! Fleet Record Storage
//!
//! Decimal normalization and the persistent record store. Records are
//! normalized so no native binary float reaches the backing store.

mod decimal;
mod record;
mod sqlite;
mod store;

pub use decimal::decimalize;
pub use record::StoredRecord;
pub use sqlite::SqliteStore;
pub use store::{InMemoryStore, RecordStore};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Record is missing its device id or timestamp key")]
    MissingKey,
}
