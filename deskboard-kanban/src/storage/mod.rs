//! Key-value blob persistence
//!
//! The board store keeps every board in one serialized blob. Anything that can
//! read and write strings by key can back it: the in-process
//! [`MemoryBlobStore`], the on-disk [`FileBlobStore`], or a remote service
//! behind the same trait.

mod debounce;
mod file;
mod memory;

pub use debounce::DebouncedWriter;
pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

use crate::error::Result;
use async_trait::async_trait;
use deskboard_config::{StorageBackend, StorageConfig};
use std::sync::Arc;

/// String blobs addressed by key
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read a blob; `None` when the key was never written
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob under `key`
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the blob under `key`; missing keys are not an error
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Build the blob store selected by configuration
pub fn open_blob_store(config: &StorageConfig) -> Arc<dyn BlobStore> {
    match config.backend {
        StorageBackend::Memory => Arc::new(MemoryBlobStore::new()),
        StorageBackend::File => Arc::new(FileBlobStore::new(&config.directory)),
    }
}
