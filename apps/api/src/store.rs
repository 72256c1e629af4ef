//! Flat-file interview store.
//!
//! The whole transcript history lives in one JSON array, rewritten on every
//! mutation. Reads never fail: a missing, empty or malformed file is "no data".

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::interview::InterviewRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Background write failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Owns the backing file. Every read-modify-write goes through one async
/// mutex so concurrent requests in this process cannot lose each other's updates.
pub struct InterviewStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl InterviewStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns every persisted record in upload order.
    pub async fn read(&self) -> Vec<InterviewRecord> {
        self.load().await.0
    }

    /// Like `read`, but under the lock, and any record stored without a
    /// session id gets one written back so later lookups can find it.
    pub async fn snapshot(&self) -> Result<Vec<InterviewRecord>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let (records, backfilled) = self.load().await;
        if backfilled {
            self.persist(&records).await?;
            info!(
                "Assigned session ids to legacy records in {}",
                self.path.display()
            );
        }
        Ok(records)
    }

    /// Loads the file, assigning ids to records that have none. The flag
    /// reports whether any id was assigned.
    async fn load(&self) -> (Vec<InterviewRecord>, bool) {
        let mut records = self.parse().await;
        let mut backfilled = false;
        for record in records.iter_mut() {
            backfilled |= record.ensure_session_id();
        }
        (records, backfilled)
    }

    async fn parse(&self) -> Vec<InterviewRecord> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Could not read store {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        // A cleared store is a zero-length file
        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<InterviewRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Store {} is malformed, treating as empty: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Replaces the file contents with `records`.
    #[cfg(test)]
    pub async fn write(&self, records: &[InterviewRecord]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.persist(records).await
    }

    /// Loads the records, applies `f`, and persists the result only when `f`
    /// succeeds. The lock is held for the whole cycle.
    pub async fn modify<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Vec<InterviewRecord>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.write_lock.lock().await;
        let (mut records, _) = self.load().await;
        let value = f(&mut records)?;
        self.persist(&records).await?;
        Ok(value)
    }

    /// Truncates the backing file to zero length.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        tokio::fs::write(&self.path, b"").await?;
        info!("Store {} cleared", self.path.display());
        Ok(())
    }

    async fn persist(&self, records: &[InterviewRecord]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_file(&path, &bytes)).await??;
        debug!(
            "Persisted {} record(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Writes to a sibling temp file and renames it over `path`, so readers see
/// either the old contents or the new ones.
fn replace_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
