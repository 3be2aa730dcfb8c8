//! In-memory blob store
//!
//! Default store for ephemeral deployments and tests; entries live for the
//! lifetime of the process.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use speech::SpeechError;
use speech::ports::BlobStore;

/// Process-local key-value store
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Whether the store holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SpeechError> {
        Ok(self.blobs.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), SpeechError> {
        self.blobs.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), SpeechError> {
        self.blobs.write().remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, SpeechError> {
        Ok(self.blobs.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete_roundtrip() {
        let store = MemoryBlobStore::new();
        store.set("a", vec![1, 2]).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(vec![1, 2]));
        assert_eq!(store.len(), 1);

        store.delete("a").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn set_overwrites_existing_value() {
        let store = MemoryBlobStore::new();
        store.set("a", vec![1]).await.unwrap();
        store.set("a", vec![2]).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(vec![2]));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_of_absent_key_is_not_an_error() {
        let store = MemoryBlobStore::new();
        assert!(store.delete("missing").await.is_ok());
    }

    #[tokio::test]
    async fn keys_lists_everything() {
        let store = MemoryBlobStore::new();
        store.set("a", vec![1]).await.unwrap();
        store.set("b", vec![2]).await.unwrap();

        let mut keys = store.keys().await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
