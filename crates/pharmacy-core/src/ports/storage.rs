//! Object storage port - where uploaded images live.

use async_trait::async_trait;
use bytes::Bytes;

/// Bucket-scoped object storage.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Name of the bucket objects are written to.
    fn bucket(&self) -> &str;

    /// Store `body` at `path` and return the stored path.
    async fn upload(&self, path: &str, body: Bytes, content_type: &str)
    -> Result<String, StorageError>;

    /// Public URL for a stored path.
    fn public_url(&self, path: &str) -> String;

    /// Delete stored objects.
    async fn remove(&self, paths: &[String]) -> Result<(), StorageError>;
}

/// Object storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage request failed: {0}")]
    Request(String),

    #[error("Storage rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },
}
