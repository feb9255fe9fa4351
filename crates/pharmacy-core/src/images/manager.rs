use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::ports::ObjectStorage;

use super::{ImageError, ImageFolder, object_path, object_path_from_public_url, validate_upload};

/// Result of clearing an image field. The field is empty in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The stored object was deleted.
    Deleted(String),
    /// The value did not point into our bucket, so nothing was deleted.
    External,
    /// Cleanup was attempted and failed; the failure was logged.
    CleanupFailed,
}

/// Resolves image fields to stored URLs.
#[derive(Clone)]
pub struct ImageAssetManager {
    storage: Arc<dyn ObjectStorage>,
}

impl ImageAssetManager {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    pub fn bucket(&self) -> &str {
        self.storage.bucket()
    }

    /// Validate and upload `body`, returning its public URL.
    pub async fn upload(
        &self,
        folder: ImageFolder,
        file_name: &str,
        content_type: &str,
        body: Bytes,
        now: DateTime<Utc>,
    ) -> Result<String, ImageError> {
        validate_upload(content_type, body.len())?;

        let suffix = Uuid::new_v4().simple().to_string();
        let path = object_path(folder, file_name, now, &suffix[..12]);

        let stored = self
            .storage
            .upload(&path, body, content_type)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, path = %path, "Image upload failed");
                ImageError::Storage(e)
            })?;

        tracing::info!(path = %stored, folder = %folder, "Image uploaded");
        Ok(self.storage.public_url(&stored))
    }

    /// A typed-in URL, used as-is once trimmed. Blank input leaves the field unchanged.
    pub fn accept_url(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Clear an image field, deleting the stored object when it is ours.
    pub async fn remove(&self, current: &str) -> Removal {
        let bucket = self.storage.bucket();
        if !current.contains(bucket) {
            return Removal::External;
        }

        let Some(path) = object_path_from_public_url(current, bucket) else {
            tracing::warn!(url = %current, "Could not parse object path from image URL");
            return Removal::CleanupFailed;
        };

        match self.storage.remove(std::slice::from_ref(&path)).await {
            Ok(()) => {
                tracing::info!(path = %path, "Image removed from storage");
                Removal::Deleted(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path, "Failed to delete image from storage");
                Removal::CleanupFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::images::MAX_IMAGE_BYTES;
    use crate::ports::StorageError;

    #[derive(Default)]
    struct CountingStorage {
        uploads: AtomicUsize,
        removed: Mutex<Vec<String>>,
        reject: bool,
    }

    #[async_trait]
    impl ObjectStorage for CountingStorage {
        fn bucket(&self) -> &str {
            "blog-images"
        }

        async fn upload(
            &self,
            path: &str,
            _body: Bytes,
            _content_type: &str,
        ) -> Result<String, StorageError> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                return Err(StorageError::Rejected {
                    status: 403,
                    message: "denied".to_string(),
                });
            }
            Ok(path.to_string())
        }

        fn public_url(&self, path: &str) -> String {
            format!("https://files.example.com/storage/v1/object/public/blog-images/{path}")
        }

        async fn remove(&self, paths: &[String]) -> Result<(), StorageError> {
            if self.reject {
                return Err(StorageError::Request("timeout".to_string()));
            }
            self.removed.lock().unwrap().extend_from_slice(paths);
            Ok(())
        }
    }

    fn manager(storage: &Arc<CountingStorage>) -> ImageAssetManager {
        ImageAssetManager::new(storage.clone())
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let storage = Arc::new(CountingStorage::default());
        let url = manager(&storage)
            .upload(
                ImageFolder::Featured,
                "Vaccine.PNG",
                "image/png",
                Bytes::from_static(b"\x89PNG"),
                Utc::now(),
            )
            .await
            .unwrap();

        assert!(url.starts_with("https://files.example.com/storage/v1/object/public/blog-images/featured/"));
        assert!(url.ends_with(".png"));
        assert_eq!(storage.uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_oversized_upload_never_calls_storage() {
        let storage = Arc::new(CountingStorage::default());
        let body = Bytes::from(vec![0u8; 6 * 1024 * 1024]);
        assert!(body.len() > MAX_IMAGE_BYTES);

        let err = manager(&storage)
            .upload(ImageFolder::Featured, "big.png", "image/png", body, Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, ImageError::TooLarge(_)));
        assert_eq!(storage.uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_wrong_type_never_calls_storage() {
        let storage = Arc::new(CountingStorage::default());
        let err = manager(&storage)
            .upload(
                ImageFolder::OgImages,
                "doc.pdf",
                "application/pdf",
                Bytes::from_static(b"%PDF"),
                Utc::now(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ImageError::UnsupportedType(_)));
        assert_eq!(storage.uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_maps_to_generic_message() {
        let storage = Arc::new(CountingStorage {
            reject: true,
            ..CountingStorage::default()
        });
        let err = manager(&storage)
            .upload(ImageFolder::Featured, "a.jpg", "image/jpeg", Bytes::from_static(b"x"), Utc::now())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to upload image. Please try again.");
    }

    #[test]
    fn test_accept_url_trims_and_ignores_blank() {
        let storage = Arc::new(CountingStorage::default());
        let images = manager(&storage);

        assert_eq!(
            images.accept_url("  https://cdn.example.com/a.webp \n").as_deref(),
            Some("https://cdn.example.com/a.webp")
        );
        assert_eq!(images.accept_url("   "), None);
        assert_eq!(images.accept_url("not even a url").as_deref(), Some("not even a url"));
    }

    #[tokio::test]
    async fn test_remove_external_url_skips_storage() {
        let storage = Arc::new(CountingStorage::default());
        let removal = manager(&storage)
            .remove("https://images.unsplash.com/photo-123.jpg")
            .await;

        assert_eq!(removal, Removal::External);
        assert!(storage.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_deletes_stored_object() {
        let storage = Arc::new(CountingStorage::default());
        let removal = manager(&storage)
            .remove("https://files.example.com/storage/v1/object/public/blog-images/featured/1-ab.png")
            .await;

        assert_eq!(removal, Removal::Deleted("featured/1-ab.png".to_string()));
        assert_eq!(*storage.removed.lock().unwrap(), vec!["featured/1-ab.png".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_failure_is_swallowed() {
        let storage = Arc::new(CountingStorage {
            reject: true,
            ..CountingStorage::default()
        });
        let removal = manager(&storage)
            .remove("https://files.example.com/storage/v1/object/public/blog-images/featured/1.png")
            .await;

        assert_eq!(removal, Removal::CleanupFailed);
    }
}
