//! Key-value persistence and the single JSON document kept in it.

use crate::error::StorageError;
use async_trait::async_trait;
use std::sync::Arc;

pub mod document;
pub mod memory;
pub mod sqlite;

pub use document::{DocumentStore, JsonDocumentStore, LEGACY_DEFAULT_LIST_KEY, WORD_LISTS_KEY};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Minimal string key-value store. Values are opaque serialized documents.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key).await
    }
}
