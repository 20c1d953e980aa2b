//! Fleet Telemetry Pipeline
//!
//! Sequences extraction, metric emission, classification, alerting,
//! normalization, and persistence for each line of a triggered source.

mod config;
mod event;
mod orchestrator;
mod source;

pub use config::PipelineConfig;
pub use event::{SourceDescriptor, TriggerEvent};
pub use orchestrator::{InvocationResponse, Orchestrator, SUCCESS_BODY};
pub use source::{HttpSourceStore, SourceError, SourceStore};

use thiserror::Error;

/// Pipeline errors. Only uncaught collaborator failures reach this type;
/// parse degradation and classification failures are absorbed upstream.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Metric error: {0}")]
    Metric(#[from] metric_reporter::MetricError),

    #[error("Notification error: {0}")]
    Notify(#[from] alerting::NotifyError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
