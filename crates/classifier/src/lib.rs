//! Sentiment Classification
//!
//! Sends raw telemetry sentences to a remote inference endpoint and maps
//! the response into a label/score pair. Every failure mode falls back to
//! an UNKNOWN prediction so the pipeline never aborts on classification.

mod adapter;
mod http;
mod response;

pub use adapter::ClassifierAdapter;
pub use http::{HttpInferenceClient, InferenceConfig};
pub use response::{InferenceResponse, Probabilities, TaggedList, TaggedNumber};

use async_trait::async_trait;
use thiserror::Error;

/// Classification error types
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Endpoint returned status {0}")]
    Endpoint(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Remote inference endpoint seam. The sentence travels as an opaque text
/// payload; the endpoint answers with JSON.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn infer(&self, sentence: &str) -> Result<InferenceResponse, ClassifyError>;
}
