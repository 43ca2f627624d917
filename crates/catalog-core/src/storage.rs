//! Raw media storage contract.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{DomainError, NotFoundError};

/// A stored blob addressed by its storage id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    /// Storage key, e.g. `<video_id>/<content-hash>.mp4`.
    pub id: String,
    /// Raw bytes.
    pub data: Vec<u8>,
    /// Mime type recorded alongside the bytes.
    pub mime_type: String,
}

/// Blob store for uploaded media files.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persists `object` under its id, replacing any previous content.
    async fn store(&self, object: StorageObject) -> Result<(), DomainError>;

    /// Fetches the object stored under `id`.
    ///
    /// # Errors
    ///
    /// [`NotFoundError`] when `id` is absent.
    async fn get(&self, id: &str) -> Result<StorageObject, DomainError>;
}

/// Map-backed storage for tests and local runs.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    objects: Mutex<HashMap<String, StorageObject>>,
}

impl InMemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn store(&self, object: StorageObject) -> Result<(), DomainError> {
        self.objects
            .lock()
            .map_err(|_| DomainError::Infrastructure("storage mutex poisoned".into()))?
            .insert(object.id.clone(), object);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<StorageObject, DomainError> {
        self.objects
            .lock()
            .map_err(|_| DomainError::Infrastructure("storage mutex poisoned".into()))?
            .get(id)
            .cloned()
            .ok_or_else(|| NotFoundError::new(id, "StorageObject").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_the_stored_object() {
        // Arrange
        let storage = InMemoryStorage::new();
        let object = StorageObject {
            id: "abc/cafe.mp4".to_owned(),
            data: vec![1, 2, 3],
            mime_type: "video/mp4".to_owned(),
        };

        // Act
        storage.store(object.clone()).await.unwrap();
        let fetched = storage.get("abc/cafe.mp4").await.unwrap();

        // Assert
        assert_eq!(fetched, object);
    }

    #[tokio::test]
    async fn test_get_of_missing_id_is_not_found() {
        // Arrange
        let storage = InMemoryStorage::new();

        // Act
        let result = storage.get("missing").await;

        // Assert
        assert_eq!(
            result.unwrap_err(),
            DomainError::NotFound(NotFoundError::new("missing", "StorageObject"))
        );
    }
}
