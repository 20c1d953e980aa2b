//! Blob Source Access

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Blob source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Source returned status {0}")]
    Status(u16),

    #[error("Source item not found: {0}/{1}")]
    NotFound(String, String),
}

/// Blob storage seam: fetch one item's full text content
#[async_trait]
pub trait SourceStore: Send + Sync {
    async fn fetch(&self, container: &str, key: &str) -> Result<String, SourceError>;
}

/// HTTP blob source, gateway style: `GET {base}/{container}/{key}`
pub struct HttpSourceStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSourceStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SourceStore for HttpSourceStore {
    async fn fetch(&self, container: &str, key: &str) -> Result<String, SourceError> {
        let url = format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            container,
            key
        );
        debug!("Fetching source item: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Fetch(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(
                container.to_string(),
                key.to_string(),
            ));
        }
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Fetch(e.to_string()))
    }
}
