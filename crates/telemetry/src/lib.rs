//! Fleet Telemetry Domain
//!
//! Provides the telemetry record types and tolerant extraction of labeled
//! fields from free-form telemetry lines.

mod extractor;
mod record;

pub use extractor::FieldExtractor;
pub use record::{Label, Prediction, TelemetryLine, UNKNOWN_DEVICE};
