//! Metric Reporting
//!
//! Emits one engine-temperature observation per telemetry record through a
//! pluggable sink, skipping sentinel-zero readings.

mod reporter;
mod sink;

pub use reporter::MetricReporter;
pub use sink::{GaugeSink, MetricSink};

use thiserror::Error;

/// Metric emission errors
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("Metric sink error: {0}")]
    Sink(String),
}
