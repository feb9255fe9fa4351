use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use pharmacy_core::ports::{ObjectStorage, StorageError};

use super::public_object_url;

struct StoredObject {
    body: Bytes,
    content_type: String,
}

/// Object storage held in process memory.
pub struct InMemoryObjectStorage {
    base_url: String,
    bucket: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStorage {
    pub fn new(base_url: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bucket: bucket.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Stored body and content type at `path`.
    pub async fn get(&self, path: &str) -> Option<(Bytes, String)> {
        self.objects
            .read()
            .await
            .get(path)
            .map(|o| (o.body.clone(), o.content_type.clone()))
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(
        &self,
        path: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let mut objects = self.objects.write().await;
        if objects.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        objects.insert(
            path.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(path.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        public_object_url(&self.base_url, &self.bucket, path)
    }

    async fn remove(&self, paths: &[String]) -> Result<(), StorageError> {
        let mut objects = self.objects.write().await;
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_then_remove() {
        let storage = InMemoryObjectStorage::new("http://localhost:8080/", "blog-images");

        let path = storage
            .upload("featured/1-a.png", Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap();
        assert_eq!(
            storage.public_url(&path),
            "http://localhost:8080/storage/v1/object/public/blog-images/featured/1-a.png"
        );
        assert_eq!(
            storage.get(&path).await.map(|(_, ty)| ty).as_deref(),
            Some("image/png")
        );

        let again = storage
            .upload("featured/1-a.png", Bytes::from_static(b"png"), "image/png")
            .await;
        assert!(matches!(again, Err(StorageError::AlreadyExists(_))));

        storage.remove(&[path]).await.unwrap();
        assert!(storage.is_empty().await);
    }
}
