//! Persistence backends
//!
//! The store persists two opaque JSON blobs under named keys. Backends only
//! move blobs; they never interpret them. The file backend mirrors the
//! one-file-per-key layout used for local agent state elsewhere in the
//! product line.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{StoreError, StoreResult};

/// Durable key-value backing for the record store.
///
/// Injectable so tests can swap a real durable medium for an in-memory map.
pub trait PersistenceBackend: Send {
    /// Read the blob stored under `key`, `None` if never written.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Durably replace the blob under `key`.
    fn save(&mut self, key: &str, blob: &str) -> StoreResult<()>;

    /// Remove the blob under `key`. No-op if absent.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

// ============================================================================
// FILE BACKEND
// ============================================================================

/// One JSON file per key under a data directory.
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Backend rooted at the platform data dir (`constants::data_dir`).
    pub fn default_dir() -> Self {
        Self::new(crate::constants::data_dir())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl PersistenceBackend for FileBackend {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StoreError::Storage(format!("read {}: {}", path.display(), e)))
    }

    fn save(&mut self, key: &str, blob: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.base_dir)
            .map_err(|e| StoreError::Storage(format!("create {}: {}", self.base_dir.display(), e)))?;
        let path = self.key_path(key);
        fs::write(&path, blob)
            .map_err(|e| StoreError::Storage(format!("write {}: {}", path.display(), e)))
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| StoreError::Storage(format!("remove {}: {}", path.display(), e)))?;
        }
        Ok(())
    }
}

// ============================================================================
// MEMORY BACKEND
// ============================================================================

/// In-memory backend. Data lives for the session only.
///
/// Used for tests and as the silent-degradation fallback when the durable
/// medium is unavailable.
#[derive(Default)]
pub struct MemoryBackend {
    blobs: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceBackend for MemoryBackend {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> StoreResult<()> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.blobs.remove(key);
        Ok(())
    }
}
