// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-addressed JSON document storage on the local filesystem.
//!
//! One directory per collection, one `<key>.json` file per record. The
//! contract the service layer relies on:
//! - `create` is exclusive: of two concurrent creates for the same key,
//!   exactly one succeeds and the other observes [`StoreError::Conflict`]
//! - `update` requires the record to exist and replaces it via a temp file
//!   and rename, so a concurrent reader never sees a partial write
//! - `read` returns an owned copy the caller may mutate freely
//!
//! Callers must not probe `exists` before `create`; the exclusive create is
//! the only duplicate-key arbiter.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("A record with that key already exists")]
    Conflict,

    #[error("Record not found")]
    NotFound,

    #[error("Invalid record key: {0}")]
    InvalidKey(String),

    #[error("Failed to serialize record: {0}")]
    Serialize(serde_json::Error),

    #[error("Failed to decode stored record: {0}")]
    Deserialize(serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// File-backed document store client.
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;

        tracing::info!(root = %root.display(), "Document store opened");

        Ok(Self { root })
    }

    fn record_path(&self, collection: &str, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(collection).join(format!("{key}.json")))
    }

    /// Check whether a record exists. Never fails; any I/O error reads as
    /// absent.
    pub async fn exists(&self, collection: &str, key: &str) -> bool {
        match self.record_path(collection, key) {
            Ok(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Create a record, failing with [`StoreError::Conflict`] if the key is
    /// already taken. The write is durably committed before this returns.
    pub async fn create<T: Serialize>(
        &self,
        collection: &str,
        key: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        let path = self.record_path(collection, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec(record).map_err(StoreError::Serialize)?;

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => StoreError::Conflict,
                _ => StoreError::Io(err),
            })?;

        file.write_all(&bytes).await?;
        file.sync_all().await?;

        Ok(())
    }

    /// Read a record, failing with [`StoreError::NotFound`] if absent.
    pub async fn read<T: DeserializeOwned>(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<T, StoreError> {
        let path = self.record_path(collection, key)?;
        let bytes = tokio::fs::read(&path).await.map_err(io_not_found)?;
        serde_json::from_slice(&bytes).map_err(StoreError::Deserialize)
    }

    /// Replace an existing record, failing with [`StoreError::NotFound`] if
    /// it does not exist. No implicit upsert.
    pub async fn update<T: Serialize>(
        &self,
        collection: &str,
        key: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        let path = self.record_path(collection, key)?;
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::NotFound);
        }

        let bytes = serde_json::to_vec(record).map_err(StoreError::Serialize)?;
        write_replace(&path, &bytes).await
    }

    /// Delete a record, failing with [`StoreError::NotFound`] if absent.
    pub async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        let path = self.record_path(collection, key)?;
        tokio::fs::remove_file(&path).await.map_err(io_not_found)
    }
}

fn io_not_found(err: std::io::Error) -> StoreError {
    match err.kind() {
        ErrorKind::NotFound => StoreError::NotFound,
        _ => StoreError::Io(err),
    }
}

/// Keys become file names; restrict the alphabet so a key can never escape
/// its collection directory.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '_'));

    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Write `bytes` to a temp file next to `path`, fsync, then rename over the
/// target. The temp file is cleaned up best-effort on failure.
async fn write_replace(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::InvalidKey(path.display().to_string()))?;

    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{file_name}.{}.{}.tmp", std::process::id(), counter);
    let tmp_path = path.with_file_name(&tmp_name);

    if let Err(err) = write_temp(&tmp_path, bytes).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(err);
    }

    if let Err(err) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(StoreError::Io(err));
    }

    Ok(())
}

async fn write_temp(tmp_path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(tmp_path)
        .await?;

    file.write_all(bytes).await?;
    file.sync_all().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Doc {
        name: String,
        count: u32,
    }

    async fn test_store() -> (FileStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        (store, dir)
    }

    fn doc(name: &str, count: u32) -> Doc {
        Doc {
            name: name.to_string(),
            count,
        }
    }

    #[tokio::test]
    async fn test_create_is_exclusive() {
        let (store, _dir) = test_store().await;

        store.create("docs", "a", &doc("first", 1)).await.unwrap();

        let err = store.create("docs", "a", &doc("second", 2)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));

        // The loser must not have clobbered the winner's record
        let stored: Doc = store.read("docs", "a").await.unwrap();
        assert_eq!(stored, doc("first", 1));
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let (store, _dir) = test_store().await;

        let err = store.read::<Doc>("docs", "nope").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_update_requires_existing_record() {
        let (store, _dir) = test_store().await;

        let err = store.update("docs", "a", &doc("x", 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));

        store.create("docs", "a", &doc("x", 1)).await.unwrap();
        store.update("docs", "a", &doc("y", 2)).await.unwrap();

        let stored: Doc = store.read("docs", "a").await.unwrap();
        assert_eq!(stored, doc("y", 2));
    }

    #[tokio::test]
    async fn test_update_leaves_no_temp_files() {
        let (store, dir) = test_store().await;

        store.create("docs", "a", &doc("x", 1)).await.unwrap();
        store.update("docs", "a", &doc("y", 2)).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("docs"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, vec!["a.json".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let (store, _dir) = test_store().await;

        store.create("docs", "a", &doc("x", 1)).await.unwrap();
        assert!(store.exists("docs", "a").await);

        store.delete("docs", "a").await.unwrap();
        assert!(!store.exists("docs", "a").await);

        let err = store.delete("docs", "a").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_exists_never_fails() {
        let (store, _dir) = test_store().await;

        // Collection directory does not exist yet
        assert!(!store.exists("docs", "a").await);
        // Invalid key reads as absent rather than erroring
        assert!(!store.exists("docs", "../escape").await);
    }

    #[tokio::test]
    async fn test_path_traversal_keys_rejected() {
        let (store, _dir) = test_store().await;

        for key in ["", "../escape", "a/b", "a.json", ".hidden"] {
            let err = store.create("docs", key, &doc("x", 1)).await.unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey(_)), "key: {key:?}");
        }
    }
}
