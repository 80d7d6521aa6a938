//! File-backed blob store

use super::BlobStore;
use crate::error::{KanbanError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// One `<key>.json` file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`
    pub fn blob_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(KanbanError::invalid_value(
                "key",
                format!("'{key}' is not a valid blob key"),
            ));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        atomic_write(&path, value.as_bytes()).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = FileBlobStore::new(temp.path().join("nested").join("dir"));

        assert_eq!(store.read("kanban_boards").await.unwrap(), None);

        store.write("kanban_boards", "[1,2,3]").await.unwrap();
        let path = store.blob_path("kanban_boards").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(
            store.read("kanban_boards").await.unwrap().as_deref(),
            Some("[1,2,3]")
        );

        store.remove("kanban_boards").await.unwrap();
        assert!(!path.exists());
        // removing twice is fine
        store.remove("kanban_boards").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp = TempDir::new().unwrap();
        let store = FileBlobStore::new(temp.path());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(
                    store.write(key, "x").await,
                    Err(KanbanError::InvalidValue { .. })
                ),
                "key {key:?} should be rejected"
            );
        }
    }
}
