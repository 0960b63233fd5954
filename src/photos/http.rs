//! Object storage over an HTTP bucket API.
//!
//! Uploads are `POST {url}/storage/v1/object/{bucket}/{key}` with the
//! service key sent both as a bearer token and as `apikey`. Objects are
//! read back from `{url}/storage/v1/object/public/{bucket}/{key}`.

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::Client;

use super::ObjectStore;
use crate::config::StorageConfig;
use crate::error::AdminError;

/// Bucket client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl HttpObjectStore {
    /// Creates a client for `bucket` on the storage service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Internal`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        service_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Result<Self, AdminError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AdminError::Internal(format!("storage client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            bucket: bucket.into(),
        })
    }

    /// Builds a client from configuration, or `None` when the URL or the
    /// service key is missing.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Internal`] if the HTTP client cannot be built.
    pub fn from_config(config: &StorageConfig) -> Result<Option<Self>, AdminError> {
        match (&config.url, &config.service_key) {
            (Some(url), Some(key)) => Self::new(url, key, &config.bucket).map(Some),
            _ => Ok(None),
        }
    }

    fn upload_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{key}", self.base_url, self.bucket)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn upload(
        &self,
        key: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<(), AdminError> {
        let size = bytes.len();
        let response = self
            .client
            .post(self.upload_url(key))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| AdminError::ObjectStorage(format!("upload request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdminError::ObjectStorage(format!(
                "upload of {key} rejected with {status}: {body}"
            )));
        }

        tracing::debug!(key, size, "photo uploaded");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{key}",
            self.base_url, self.bucket
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_base_and_bucket() {
        let Ok(store) = HttpObjectStore::new("https://files.example.com/", "key", "wedding-photos")
        else {
            panic!("client should build");
        };
        assert_eq!(
            store.upload_url("1-a.jpg"),
            "https://files.example.com/storage/v1/object/wedding-photos/1-a.jpg"
        );
        assert_eq!(
            store.public_url("1-a.jpg"),
            "https://files.example.com/storage/v1/object/public/wedding-photos/1-a.jpg"
        );
    }

    #[test]
    fn missing_config_disables_uploads() {
        let config = StorageConfig {
            url: Some("https://files.example.com".into()),
            service_key: None,
            bucket: "wedding-photos".into(),
        };
        let Ok(store) = HttpObjectStore::from_config(&config) else {
            panic!("from_config should not fail");
        };
        assert!(store.is_none());
    }
}
