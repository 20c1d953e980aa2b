//! SQLite Record Store

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::{RecordStore, StorageError};

/// SQLite-backed record store keyed by device id plus timestamp
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to the database and ensure the records table exists
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS fleet_records (
                device_id TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                record    TEXT NOT NULL,
                PRIMARY KEY (device_id, timestamp)
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        info!("Connected to record store: {}", database_url);
        Ok(Self { pool })
    }

    /// Number of records currently stored (used by the health surface)
    pub async fn record_count(&self) -> Result<i64, StorageError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM fleet_records")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(row.0)
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn put_record(&self, record: Value) -> Result<(), StorageError> {
        let device_id = record
            .get("device_id")
            .and_then(Value::as_str)
            .ok_or(StorageError::MissingKey)?
            .to_string();
        let timestamp = record
            .get("timestamp")
            .and_then(Value::as_str)
            .ok_or(StorageError::MissingKey)?
            .to_string();

        let body = serde_json::to_string(&record)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        sqlx::query(
            "INSERT OR REPLACE INTO fleet_records (device_id, timestamp, record)
             VALUES (?1, ?2, ?3)",
        )
        .bind(&device_id)
        .bind(&timestamp)
        .bind(&body)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        debug!("Persisted record for {} @ {}", device_id, timestamp);
        Ok(())
    }
}
