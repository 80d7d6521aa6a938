//! In-process blob store

use super::BlobStore;
use crate::error::{KanbanError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Blob store kept in a map, with an optional quota on total stored bytes.
///
/// The quota mirrors browser-local storage, which rejects writes past a
/// fixed budget. Successful writes are counted.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
    writes: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push the total stored size past `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current value under `key`, without going through the async trait
    pub async fn get(&self, key: &str) -> Option<String> {
        self.blobs.read().await.get(key).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut blobs = self.blobs.write().await;

        if let Some(quota) = self.quota {
            let others: usize = blobs
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(KanbanError::QuotaExceeded { needed, quota });
            }
        }

        blobs.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.blobs.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_write_remove() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.read("k").await.unwrap(), None);

        store.write("k", "v1").await.unwrap();
        store.write("k", "v2").await.unwrap();
        assert_eq!(store.read("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(store.write_count(), 2);

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await, None);
        store.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_quota_rejects_oversized_write() {
        let store = MemoryBlobStore::with_quota(16);
        store.write("k", "0123456789").await.unwrap();

        let result = store.write("k", "01234567890123456789").await;
        assert!(matches!(
            result,
            Err(KanbanError::QuotaExceeded { quota: 16, .. })
        ));
        // previous value survives a rejected write
        assert_eq!(store.get("k").await.as_deref(), Some("0123456789"));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_quota_counts_replaced_value_once() {
        let store = MemoryBlobStore::with_quota(12);
        store.write("k", "0123456789").await.unwrap();
        // replacing the same key must not count the old value
        store.write("k", "abcdefghij").await.unwrap();
    }
}
