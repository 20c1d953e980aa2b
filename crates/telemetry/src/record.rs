//! Telemetry Record Types

use serde::{Deserialize, Serialize};

/// Device id substituted when a line carries no parseable `device_id` token
pub const UNKNOWN_DEVICE: &str = "UNKNOWN";

/// One parsed telemetry line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryLine {
    /// Raw line text (trimmed), preserved verbatim
    pub raw: String,
    /// Vehicle identifier (defaults to "UNKNOWN")
    pub device_id: String,
    /// "YYYY-MM-DD HH:MM:SS"-style timestamp; empty string means absent
    pub timestamp: String,
    /// Speed in km/h (0.0 when absent)
    pub speed_kmph: f64,
    /// Fuel level in percent (0.0 when absent)
    pub fuel_level_percent: f64,
    /// Engine temperature in °C (0.0 means "no reading")
    pub engine_temp_c: f64,
}

impl TelemetryLine {
    /// An empty timestamp is the sole gate that skips persistence
    pub fn has_timestamp(&self) -> bool {
        !self.timestamp.is_empty()
    }
}

/// Sentiment label produced by classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Positive,
    Negative,
    Unknown,
}

impl Label {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "POSITIVE",
            Label::Negative => "NEGATIVE",
            Label::Unknown => "UNKNOWN",
        }
    }
}

/// Classification attached to a telemetry line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    /// In [0, 1] when the label is known, 0.0 otherwise
    pub score: f64,
}

impl Prediction {
    /// Fallback prediction used when classification fails for any reason
    pub fn unknown() -> Self {
        Self {
            label: Label::Unknown,
            score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_serializes_uppercase() {
        let json = serde_json::to_string(&Label::Positive).unwrap();
        assert_eq!(json, "\"POSITIVE\"");
        let json = serde_json::to_string(&Label::Unknown).unwrap();
        assert_eq!(json, "\"UNKNOWN\"");
    }

    #[test]
    fn unknown_prediction_has_zero_score() {
        let pred = Prediction::unknown();
        assert_eq!(pred.label, Label::Unknown);
        assert_eq!(pred.score, 0.0);
    }

    #[test]
    fn empty_timestamp_gates_persistence() {
        let mut line = TelemetryLine {
            raw: String::new(),
            device_id: UNKNOWN_DEVICE.to_string(),
            timestamp: String::new(),
            speed_kmph: 0.0,
            fuel_level_percent: 0.0,
            engine_temp_c: 0.0,
        };
        assert!(!line.has_timestamp());

        line.timestamp = "2024-05-01 10:00:00".to_string();
        assert!(line.has_timestamp());
    }
}
