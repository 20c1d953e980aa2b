//! Tolerant Field Extraction

use regex::Regex;

use crate::record::{TelemetryLine, UNKNOWN_DEVICE};

/// Extracts the five recognized labeled tokens from a free-form telemetry
/// line.
///
/// Each field is matched independently anywhere in the line; a missing or
/// malformed token for one field never prevents extraction of the others,
/// and a fully unparseable line degrades to defaults with the raw text
/// preserved. Extraction never fails.
pub struct FieldExtractor {
    device_id: Regex,
    timestamp: Regex,
    speed_kmph: Regex,
    fuel_level_percent: Regex,
    engine_temp_c: Regex,
}

impl FieldExtractor {
    /// Create an extractor with the recognized token patterns compiled once
    pub fn new() -> Self {
        Self {
            device_id: Regex::new(r"device_id (\S+)").expect("valid pattern"),
            timestamp: Regex::new(r"timestamp ([\d-]+ [\d:]+)").expect("valid pattern"),
            speed_kmph: Regex::new(r"speed_kmph (\d+\.?\d*)").expect("valid pattern"),
            fuel_level_percent: Regex::new(r"fuel_level_percent (\d+\.?\d*)")
                .expect("valid pattern"),
            engine_temp_c: Regex::new(r"engine_temp_c (\d+\.?\d*)").expect("valid pattern"),
        }
    }

    /// Parse one raw line into a structured record, substituting documented
    /// defaults for anything that does not match.
    pub fn extract(&self, raw: &str) -> TelemetryLine {
        let line = raw.trim();

        TelemetryLine {
            raw: line.to_string(),
            device_id: capture(&self.device_id, line)
                .unwrap_or(UNKNOWN_DEVICE)
                .to_string(),
            timestamp: capture(&self.timestamp, line).unwrap_or("").to_string(),
            speed_kmph: capture_f64(&self.speed_kmph, line),
            fuel_level_percent: capture_f64(&self.fuel_level_percent, line),
            engine_temp_c: capture_f64(&self.engine_temp_c, line),
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str())
}

fn capture_f64(re: &Regex, line: &str) -> f64 {
    capture(re, line)
        .and_then(|token| token.parse::<f64>().ok())
        .unwrap_or(0.0)
}
