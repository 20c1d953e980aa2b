//! HTTP Inference Client

use async_trait::async_trait;
use tracing::debug;

use crate::{ClassifyError, InferenceClient, InferenceResponse};

/// Inference endpoint configuration
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Endpoint URL accepting a raw text body
    pub endpoint_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint_url: "http://localhost:8501/invocations".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Client for a hosted sentiment model invoked over HTTP
pub struct HttpInferenceClient {
    config: InferenceConfig,
    client: reqwest::Client,
}

impl HttpInferenceClient {
    pub fn new(config: InferenceConfig) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn infer(&self, sentence: &str) -> Result<InferenceResponse, ClassifyError> {
        debug!("Invoking inference endpoint: {}", self.config.endpoint_url);

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-text")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(sentence.to_string())
            .send()
            .await
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Endpoint(status.as_u16()));
        }

        response
            .json::<InferenceResponse>()
            .await
            .map_err(|e| ClassifyError::InvalidResponse(e.to_string()))
    }
}
