//! Object storage adapters for uploaded images.

#[cfg(feature = "storage")]
mod http;
mod memory;

#[cfg(feature = "storage")]
pub use http::{HttpObjectStorage, StorageConfig};
pub use memory::InMemoryObjectStorage;

/// Public URL of `path` in `bucket`, as served by the storage API.
pub(crate) fn public_object_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        path
    )
}
