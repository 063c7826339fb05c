use crate::error::StorageError;
use crate::logger;
use crate::models::Store;
use crate::storage::KeyValueStore;
use async_trait::async_trait;

/// Key holding the serialized list of word lists.
pub const WORD_LISTS_KEY: &str = "wordLists";
/// Reserved by older releases; only removed when wiping user data.
pub const LEGACY_DEFAULT_LIST_KEY: &str = "defaultList";

/// Whole-document persistence for the word list store.
///
/// There is no partial update: callers load everything, change it, and save
/// everything back.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns an empty store when nothing has been saved yet.
    async fn load(&self) -> Result<Store, StorageError>;

    async fn save(&self, store: &Store) -> Result<(), StorageError>;

    /// Drops the document and every legacy key.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Stores the document as one JSON string under [`WORD_LISTS_KEY`].
#[derive(Debug)]
pub struct JsonDocumentStore<K> {
    kv: K,
}

impl<K: KeyValueStore> JsonDocumentStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn backend(&self) -> &K {
        &self.kv
    }
}

#[async_trait]
impl<K: KeyValueStore> DocumentStore for JsonDocumentStore<K> {
    async fn load(&self) -> Result<Store, StorageError> {
        match self.kv.get(WORD_LISTS_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Store::default()),
        }
    }

    async fn save(&self, store: &Store) -> Result<(), StorageError> {
        let json = serde_json::to_string(store)?;
        self.kv.set(WORD_LISTS_KEY, &json).await?;
        logger::log(&format!("Persisted {} word lists", store.lists.len()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.kv.remove(WORD_LISTS_KEY).await?;
        self.kv.remove(LEGACY_DEFAULT_LIST_KEY).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WordList;
    use crate::storage::MemoryStore;
    use chrono::Utc;

    #[tokio::test]
    async fn test_load_missing_document_is_empty() {
        let docs = JsonDocumentStore::new(MemoryStore::new());
        let store = docs.load().await.unwrap();
        assert!(store.lists.is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_single_key() {
        let docs = JsonDocumentStore::new(MemoryStore::new());
        let store = Store {
            lists: vec![WordList::new("default", "General", Utc::now())],
        };

        docs.save(&store).await.unwrap();

        assert_eq!(docs.backend().len().await, 1);
        assert_eq!(docs.load().await.unwrap(), store);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_serialization_error() {
        let kv = MemoryStore::new();
        kv.set(WORD_LISTS_KEY, "{not json").await.unwrap();
        let docs = JsonDocumentStore::new(kv);

        let result = docs.load().await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_clear_removes_legacy_key() {
        let kv = MemoryStore::new();
        kv.set(LEGACY_DEFAULT_LIST_KEY, "{}").await.unwrap();
        kv.set(WORD_LISTS_KEY, "[]").await.unwrap();
        let docs = JsonDocumentStore::new(kv);

        docs.clear().await.unwrap();

        assert!(docs.backend().is_empty().await);
    }
}
