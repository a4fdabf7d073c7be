//! Redb-backed weather cache
//!
//! Durable key/value store for fetched reports, surviving process restarts.
//! One record per (city, provider, unit); the record value is the
//! `CachedReport` JSON document — the on-disk layout is contractual, so
//! values are stored as JSON rather than a binary codec.
//!
//! Caching is best-effort throughout: storage and decode problems degrade
//! to misses on the read side and are logged and swallowed on the write
//! side. A record that fails to decode is treated as absent but NOT
//! removed; it sits in storage until a successful write overwrites it.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use application::ports::{CacheKey, CacheStorePort, CachedReport};
use async_trait::async_trait;
use domain::WeatherReport;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use thiserror::Error;
use tracing::{debug, warn};

/// Table holding the cache records
const CACHE_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("weather_cache");

/// Error opening the cache database
#[derive(Debug, Error)]
#[error("Failed to open cache store: {0}")]
pub struct CacheOpenError(String);

/// Durable weather cache on a redb database file
pub struct RedbCacheStore {
    db: Arc<Database>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for RedbCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbCacheStore")
            .field("db", &"<Database>")
            .field("path", &self.path)
            .finish()
    }
}

impl RedbCacheStore {
    /// Open (or create) the cache database at `path`
    ///
    /// An existing file that cannot be opened (corrupted or written by an
    /// incompatible version) is deleted and recreated; the cache holds
    /// nothing that cannot be refetched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened after the retry.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CacheOpenError> {
        let path_buf = path.as_ref().to_path_buf();

        let db = match Database::create(&path_buf) {
            Ok(db) => db,
            Err(e) => {
                warn!(
                    path = %path_buf.display(),
                    error = %e,
                    "Cache database corrupted or incompatible, recreating"
                );
                if path_buf.exists() {
                    fs::remove_file(&path_buf).map_err(|e| {
                        CacheOpenError(format!("Failed to remove corrupted database: {e}"))
                    })?;
                }
                Database::create(&path_buf)
                    .map_err(|e| CacheOpenError(format!("Failed to create database: {e}")))?
            },
        };

        Self::ensure_table(&db)?;

        Ok(Self {
            db: Arc::new(db),
            path: Some(path_buf),
        })
    }

    /// Create an in-memory cache (for testing)
    #[cfg(test)]
    pub(crate) fn in_memory() -> Result<Self, CacheOpenError> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|e| CacheOpenError(format!("Failed to create in-memory database: {e}")))?;

        Self::ensure_table(&db)?;

        Ok(Self {
            db: Arc::new(db),
            path: None,
        })
    }

    /// Opening the table creates it if it doesn't exist
    fn ensure_table(db: &Database) -> Result<(), CacheOpenError> {
        let write_txn = db
            .begin_write()
            .map_err(|e| CacheOpenError(format!("Failed to begin write transaction: {e}")))?;
        {
            let _ = write_txn
                .open_table(CACHE_TABLE)
                .map_err(|e| CacheOpenError(format!("Failed to open cache table: {e}")))?;
        }
        write_txn
            .commit()
            .map_err(|e| CacheOpenError(format!("Failed to commit transaction: {e}")))?;
        Ok(())
    }

    /// Current wall-clock time in epoch milliseconds
    #[allow(clippy::cast_possible_truncation)]
    fn now_epoch_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Read the raw record bytes for a storage key, miss on any error
    async fn read_raw(&self, storage_key: String) -> Option<Vec<u8>> {
        let db = Arc::clone(&self.db);
        let result = tokio::task::spawn_blocking(move || {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(CACHE_TABLE)?;
            Ok::<_, redb::Error>(
                table
                    .get(storage_key.as_bytes())?
                    .map(|value| value.value().to_vec()),
            )
        })
        .await;

        match result {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                warn!(error = %e, "Cache read failed");
                None
            },
            Err(e) => {
                warn!(error = %e, "Cache read task failed");
                None
            },
        }
    }

    /// Write raw record bytes; failures are logged and swallowed
    async fn write_raw(&self, storage_key: String, bytes: Vec<u8>) {
        let db = Arc::clone(&self.db);
        let result = tokio::task::spawn_blocking(move || {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(CACHE_TABLE)?;
                table.insert(storage_key.as_bytes(), bytes.as_slice())?;
            }
            write_txn.commit()?;
            Ok::<_, redb::Error>(())
        })
        .await;

        match result {
            Ok(Ok(())) => {},
            Ok(Err(e)) => warn!(error = %e, "Cache write failed"),
            Err(e) => warn!(error = %e, "Cache write task failed"),
        }
    }

    /// Delete a record; failures are logged and swallowed
    async fn remove_raw(&self, storage_key: String) {
        let db = Arc::clone(&self.db);
        let result = tokio::task::spawn_blocking(move || {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(CACHE_TABLE)?;
                table.remove(storage_key.as_bytes())?;
            }
            write_txn.commit()?;
            Ok::<_, redb::Error>(())
        })
        .await;

        match result {
            Ok(Ok(())) => {},
            Ok(Err(e)) => warn!(error = %e, "Cache delete failed"),
            Err(e) => warn!(error = %e, "Cache delete task failed"),
        }
    }

    /// Decode a record, treating malformed data as a miss
    ///
    /// The bad record is left in place (matches the observed behavior of
    /// the system this replaces; it lingers until the next overwrite).
    fn decode(storage_key: &str, bytes: &[u8]) -> Option<CachedReport> {
        match serde_json::from_slice(bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(key = %storage_key, error = %e, "Malformed cache record, treating as miss");
                None
            },
        }
    }

    /// Read and decode without any age handling
    async fn lookup(&self, key: &CacheKey) -> Option<CachedReport> {
        let storage_key = key.storage_key();
        let bytes = self.read_raw(storage_key.clone()).await?;
        Self::decode(&storage_key, &bytes)
    }
}

#[async_trait]
impl CacheStorePort for RedbCacheStore {
    async fn get(&self, key: &CacheKey) -> Option<CachedReport> {
        let entry = self.lookup(key).await?;
        if entry.is_expired(Self::now_epoch_millis()) {
            let storage_key = key.storage_key();
            debug!(key = %storage_key, "Cache entry expired, purging");
            self.remove_raw(storage_key).await;
            return None;
        }
        debug!(key = %key.storage_key(), "Cache hit");
        Some(entry)
    }

    async fn get_ignoring_expiry(&self, key: &CacheKey) -> Option<CachedReport> {
        self.lookup(key).await
    }

    async fn set(&self, key: &CacheKey, report: &WeatherReport) {
        let entry = CachedReport::new(key, report.clone(), Self::now_epoch_millis());
        match serde_json::to_vec(&entry) {
            Ok(bytes) => self.write_raw(key.storage_key(), bytes).await,
            Err(e) => warn!(error = %e, "Cache entry serialization failed"),
        }
    }
}
