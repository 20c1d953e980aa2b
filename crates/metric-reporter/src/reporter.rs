//! Per-Record Metric Reporter

use std::sync::Arc;

use telemetry::TelemetryLine;
use tracing::debug;

use crate::{MetricError, MetricSink};

/// Emits one observation per record through the configured sink
pub struct MetricReporter {
    sink: Arc<dyn MetricSink>,
}

impl MetricReporter {
    pub fn new(sink: Arc<dyn MetricSink>) -> Self {
        Self { sink }
    }

    /// Report the record's engine temperature.
    ///
    /// A reading of exactly 0.0 is the "no reading" sentinel and is skipped
    /// entirely rather than reported as a real zero-degree measurement.
    /// Sink failures propagate to the caller.
    pub async fn report(&self, line: &TelemetryLine) -> Result<(), MetricError> {
        if line.engine_temp_c == 0.0 {
            debug!(
                "Skipping metric for {}: no engine temperature reading",
                line.device_id
            );
            return Ok(());
        }

        self.sink
            .record_engine_temp(&line.device_id, line.engine_temp_c)
            .await
    }
}
