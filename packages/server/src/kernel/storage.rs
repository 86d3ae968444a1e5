// Object storage over HTTP
//
// Speaks the hosted storage REST API:
//   upload:  POST {base}/storage/v1/object/{bucket}/{key}
//   public:  GET  {base}/storage/v1/object/public/{bucket}/{key}

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use super::BaseObjectStorage;

pub struct HttpObjectStorage {
    http: Client,
    base_url: String,
    service_key: String,
}

impl HttpObjectStorage {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            encode_key(key)
        )
    }
}

/// Percent-encode each path segment of an object key, keeping the slashes.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl BaseObjectStorage for HttpObjectStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let size = bytes.len();
        let response = self
            .http
            .post(format!(
                "{}/storage/v1/object/{}/{}",
                self.base_url,
                bucket,
                encode_key(key)
            ))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("content-type", content_type)
            .body(bytes)
            .send()
            .await
            .context("Failed to reach object storage")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(bucket, key, status = %status, body = %body, "Upload rejected");
            anyhow::bail!("Object storage rejected upload ({}): {}", status, body);
        }

        info!(bucket, key, size, "Uploaded object");
        Ok(self.public_url(bucket, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_public_url() {
        let storage = HttpObjectStorage::new("https://files.example.com/", "key");
        assert_eq!(
            storage.public_url("blog-images", "blog/1700000000000_foto.png"),
            "https://files.example.com/storage/v1/object/public/blog-images/blog/1700000000000_foto.png"
        );
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/storage/v1/object/blog-images/blog/1_a.png")
                    .header("authorization", "Bearer service-key")
                    .header("content-type", "image/png");
                then.status(200).body(r#"{"Key":"blog-images/blog/1_a.png"}"#);
            })
            .await;

        let storage = HttpObjectStorage::new(server.base_url(), "service-key");
        let url = storage
            .upload("blog-images", "blog/1_a.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            url,
            format!("{}/storage/v1/object/public/blog-images/blog/1_a.png", server.base_url())
        );
    }

    #[tokio::test]
    async fn test_upload_failure_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(403).body("forbidden");
            })
            .await;

        let storage = HttpObjectStorage::new(server.base_url(), "bad");
        let result = storage
            .upload("blog-images", "blog/1_a.png", "image/png", vec![])
            .await;
        assert!(result.is_err());
    }
}
