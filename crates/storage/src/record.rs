//! Persisted Record Shape

use serde::{Deserialize, Serialize};
use telemetry::{Prediction, TelemetryLine};

/// Union of the telemetry fields, raw sentence, and prediction, as written
/// to the record store. Written once per qualifying line; never updated or
/// deleted by this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub device_id: String,
    pub timestamp: String,
    pub sentence: String,
    pub speed_kmph: f64,
    pub fuel_level_percent: f64,
    pub engine_temp_c: f64,
    pub prediction: Prediction,
}

impl StoredRecord {
    pub fn new(line: &TelemetryLine, prediction: Prediction) -> Self {
        Self {
            device_id: line.device_id.clone(),
            timestamp: line.timestamp.clone(),
            sentence: line.raw.clone(),
            speed_kmph: line.speed_kmph,
            fuel_level_percent: line.fuel_level_percent,
            engine_temp_c: line.engine_temp_c,
            prediction,
        }
    }
}
