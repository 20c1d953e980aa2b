//! Metric Sink Implementations

use async_trait::async_trait;

use crate::MetricError;

/// Time-series sink seam: one named observation dimensioned by vehicle id
#[async_trait]
pub trait MetricSink: Send + Sync {
    async fn record_engine_temp(
        &self,
        device_id: &str,
        engine_temp_c: f64,
    ) -> Result<(), MetricError>;
}

/// Sink backed by the `metrics` facade; the Prometheus recorder is
/// installed by the binary. Recording through the facade cannot fail.
pub struct GaugeSink;

#[async_trait]
impl MetricSink for GaugeSink {
    async fn record_engine_temp(
        &self,
        device_id: &str,
        engine_temp_c: f64,
    ) -> Result<(), MetricError> {
        metrics::gauge!("engine_temperature_c", "vehicle_id" => device_id.to_string())
            .set(engine_temp_c);
        Ok(())
    }
}
