//! Record Store
//!
//! Holds the authoritative ordered sequence of exercise records. Position is
//! the only address: update/delete take a 0-based index and deletes shift
//! every later record down by one.
//!
//! Two backends share the [`RecordStore`] contract:
//! - [`JsonFileStore`]: one pretty-printed JSON array on disk, rewritten
//!   whole on every mutation via temp file + rename
//! - [`MemoryStore`]: in-process, for tests and ephemeral runs
//!
//! Mutations are serialized behind a single writer lock so concurrent
//! read-modify-write cycles cannot lose updates.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::ExerciseRecord;

/// Read/write contract for the record collection
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append a record at the end, returning its index
    async fn append(&self, record: ExerciseRecord) -> StorageResult<usize>;

    /// Full sequence in storage order; empty if nothing was ever written
    async fn read_all(&self) -> StorageResult<Vec<ExerciseRecord>>;

    /// Overwrite the non-null fields of `patch` on the record at `index`
    async fn update_at(&self, index: i64, patch: &Map<String, Value>) -> StorageResult<()>;

    /// Remove the record at `index`, returning it
    async fn delete_at(&self, index: i64) -> StorageResult<ExerciseRecord>;

    /// Whether anything has ever been written
    async fn is_initialized(&self) -> bool;
}

/// Check `index` against the current length
fn checked_index(index: i64, len: usize) -> StorageResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(StorageError::IndexOutOfRange { index, len })
}

fn apply_update(
    records: &mut [ExerciseRecord],
    index: i64,
    patch: &Map<String, Value>,
) -> StorageResult<()> {
    let slot = checked_index(index, records.len())?;
    records[slot].merge(patch);
    Ok(())
}

fn apply_delete(records: &mut Vec<ExerciseRecord>, index: i64) -> StorageResult<ExerciseRecord> {
    let slot = checked_index(index, records.len())?;
    Ok(records.remove(slot))
}

// ============================================
// JSON FILE STORE
// ============================================

/// Record store backed by a single JSON array file
pub struct JsonFileStore {
    /// Path to the records file
    path: PathBuf,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store rooted at `path`. The file is created lazily on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file, `None` if it does not exist yet
    async fn load(&self) -> StorageResult<Option<Vec<ExerciseRecord>>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let records: Vec<ExerciseRecord> = serde_json::from_str(&content)?;
        Ok(Some(records))
    }

    /// Write the whole sequence atomically (temp file + rename)
    async fn persist(&self, records: &[ExerciseRecord]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(path = ?self.path, records = records.len(), "Persisted record file");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn append(&self, record: ExerciseRecord) -> StorageResult<usize> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?.unwrap_or_default();
        records.push(record);
        self.persist(&records).await?;

        Ok(records.len() - 1)
    }

    async fn read_all(&self) -> StorageResult<Vec<ExerciseRecord>> {
        Ok(self.load().await?.unwrap_or_default())
    }

    async fn update_at(&self, index: i64, patch: &Map<String, Value>) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?.ok_or(StorageError::NoData)?;
        apply_update(&mut records, index, patch)?;
        self.persist(&records).await
    }

    async fn delete_at(&self, index: i64) -> StorageResult<ExerciseRecord> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?.ok_or(StorageError::NoData)?;
        let removed = apply_delete(&mut records, index)?;
        self.persist(&records).await?;
        Ok(removed)
    }

    async fn is_initialized(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}

// ============================================
// MEMORY STORE
// ============================================

/// In-memory record store; `None` until the first append
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Option<Vec<ExerciseRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with_records(records: Vec<ExerciseRecord>) -> Self {
        Self {
            records: RwLock::new(Some(records)),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append(&self, record: ExerciseRecord) -> StorageResult<usize> {
        let mut guard = self.records.write().await;
        let records = guard.get_or_insert_with(Vec::new);
        records.push(record);
        Ok(records.len() - 1)
    }

    async fn read_all(&self) -> StorageResult<Vec<ExerciseRecord>> {
        Ok(self.records.read().await.clone().unwrap_or_default())
    }

    async fn update_at(&self, index: i64, patch: &Map<String, Value>) -> StorageResult<()> {
        let mut guard = self.records.write().await;
        let records = guard.as_mut().ok_or(StorageError::NoData)?;
        apply_update(records, index, patch)
    }

    async fn delete_at(&self, index: i64) -> StorageResult<ExerciseRecord> {
        let mut guard = self.records.write().await;
        let records = guard.as_mut().ok_or(StorageError::NoData)?;
        apply_delete(records, index)
    }

    async fn is_initialized(&self) -> bool {
        self.records.read().await.is_some()
    }
}
