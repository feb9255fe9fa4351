//! Storage API client.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use pharmacy_core::ports::{ObjectStorage, StorageError};

use super::public_object_url;

/// Storage API connection settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub url: String,
    pub bucket: String,
    pub service_key: String,
}

#[derive(Serialize)]
struct RemoveRequest<'a> {
    prefixes: &'a [String],
}

/// Object storage behind an HTTP storage API (`/storage/v1/object/...`).
pub struct HttpObjectStorage {
    config: StorageConfig,
    client: Client,
}

impl HttpObjectStorage {
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StorageError::Request(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn base(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base(), self.config.bucket, path)
    }

    fn bucket_url(&self) -> String {
        format!("{}/storage/v1/object/{}", self.base(), self.config.bucket)
    }

    async fn rejected(response: reqwest::Response) -> StorageError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        StorageError::Rejected { status, message }
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    fn bucket(&self) -> &str {
        &self.config.bucket
    }

    async fn upload(
        &self,
        path: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        tracing::debug!(path = %path, size = body.len(), "Uploading object");

        let response = self
            .client
            .post(self.object_url(path))
            .bearer_auth(&self.config.service_key)
            .header("apikey", &self.config.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, "max-age=3600")
            .header("x-upsert", "false")
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(path.to_string()),
            StatusCode::CONFLICT => Err(StorageError::AlreadyExists(path.to_string())),
            _ => Err(Self::rejected(response).await),
        }
    }

    fn public_url(&self, path: &str) -> String {
        public_object_url(self.base(), &self.config.bucket, path)
    }

    async fn remove(&self, paths: &[String]) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(self.bucket_url())
            .bearer_auth(&self.config.service_key)
            .header("apikey", &self.config.service_key)
            .json(&RemoveRequest { prefixes: paths })
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejected(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> HttpObjectStorage {
        HttpObjectStorage::new(StorageConfig {
            url: "https://abc.supabase.co/".to_string(),
            bucket: "blog-images".to_string(),
            service_key: "service-key".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_urls() {
        let storage = storage();

        assert_eq!(
            storage.object_url("featured/1-a.png"),
            "https://abc.supabase.co/storage/v1/object/blog-images/featured/1-a.png"
        );
        assert_eq!(
            storage.bucket_url(),
            "https://abc.supabase.co/storage/v1/object/blog-images"
        );
        assert_eq!(
            storage.public_url("featured/1-a.png"),
            "https://abc.supabase.co/storage/v1/object/public/blog-images/featured/1-a.png"
        );
    }

    #[test]
    fn test_remove_body_shape() {
        let paths = vec!["featured/1-a.png".to_string()];
        let body = serde_json::to_value(RemoveRequest { prefixes: &paths }).unwrap();
        assert_eq!(body, serde_json::json!({ "prefixes": ["featured/1-a.png"] }));
    }
}
