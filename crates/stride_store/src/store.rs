//! Whole-document persistence behind a small async seam.
//!
//! Stores hold one serializable document each. `load` degrades to the
//! document's default on unreadable or corrupt data so a bad file never takes
//! the system down; `save` surfaces failure so callers never silently drop
//! writes. Saves always write the full document, so readers never observe a
//! partially applied mutation.

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use stride_core::StrideError;

#[async_trait]
pub trait StateStore<T>: Send + Sync
where
    T: Serialize + DeserializeOwned + Default + Send + Sync,
{
    /// Read the current document, falling back to `T::default()` if the
    /// backing store is missing or unreadable.
    async fn load(&self) -> T;

    /// Persist the full document.
    async fn save(&self, state: &T) -> Result<()>;
}

/// Bare load/dump JSON file store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<T> StateStore<T> for JsonFileStore
where
    T: Serialize + DeserializeOwned + Default + Send + Sync,
{
    async fn load(&self) -> T {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No state file at {}, starting fresh", self.path.display());
                return T::default();
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read {}, degrading to default state: {}",
                    self.path.display(),
                    e
                );
                return T::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(
                    "Corrupt state file {}, degrading to default state: {}",
                    self.path.display(),
                    e
                );
                T::default()
            }
        }
    }

    async fn save(&self, state: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StrideError::Storage(format!("serialize failed: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    StrideError::Storage(format!(
                        "create dir {} failed: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            StrideError::Storage(format!("write {} failed: {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions. Keeps the serialized
/// form so serde round-trips are exercised the same as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: std::sync::Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T> StateStore<T> for MemoryStore
where
    T: Serialize + DeserializeOwned + Default + Send + Sync,
{
    async fn load(&self) -> T {
        let slot = self.slot.lock().expect("memory store lock poisoned");
        match slot.as_deref().map(serde_json::from_str) {
            Some(Ok(state)) => state,
            Some(Err(e)) => {
                tracing::warn!("Corrupt in-memory state, degrading to default: {}", e);
                T::default()
            }
            None => T::default(),
        }
    }

    async fn save(&self, state: &T) -> Result<()> {
        let json = serde_json::to_string(state)
            .map_err(|e| StrideError::Storage(format!("serialize failed: {}", e)))?;
        *self.slot.lock().expect("memory store lock poisoned") = Some(json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_json_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        let state = vec![1u64, 2, 3];
        store.save(&state).await.unwrap();
        let loaded: Vec<u64> = store.load().await;
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        let loaded: Vec<u64> = store.load().await;
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_degrades_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let store = JsonFileStore::new(&path);
        let loaded: Vec<u64> = store.load().await;
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deeper/state.json"));
        store.save(&vec![42u64]).await.unwrap();
        let loaded: Vec<u64> = store.load().await;
        assert_eq!(loaded, vec![42]);
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.save(&vec![7u64]).await.unwrap();
        let loaded: Vec<u64> = store.load().await;
        assert_eq!(loaded, vec![7]);
    }
}
