//! Engine Temperature Threshold Alerter

use std::collections::HashMap;
use std::sync::Arc;

use telemetry::TelemetryLine;
use tracing::{debug, info};

use crate::{Notifier, NotifyError};

/// Alert threshold in °C. Strictly exclusive: exactly 100.0 does not alert.
pub const ENGINE_TEMP_ALERT_C: f64 = 100.0;

/// Evaluates the safety threshold and routes alerts per device
pub struct ThresholdAlerter {
    /// Static device-id to topic routing table, consulted read-only
    routes: HashMap<String, String>,
    notifier: Arc<dyn Notifier>,
}

impl ThresholdAlerter {
    pub fn new(routes: HashMap<String, String>, notifier: Arc<dyn Notifier>) -> Self {
        Self { routes, notifier }
    }

    /// Evaluate one record and publish an alert when the threshold is
    /// breached.
    ///
    /// Returns `Ok(true)` when an alert was published. Devices without a
    /// route are skipped silently. Publish failures propagate.
    pub async fn process(&self, line: &TelemetryLine) -> Result<bool, NotifyError> {
        if line.engine_temp_c <= ENGINE_TEMP_ALERT_C {
            return Ok(false);
        }

        let Some(topic) = self.routes.get(&line.device_id) else {
            debug!("No alert route for device {}, skipping", line.device_id);
            return Ok(false);
        };

        let subject = format!("Fleet Vehicle Alert: {}", line.device_id);
        let body = alert_message(line);

        self.notifier.publish(topic, &subject, &body).await?;
        info!(
            "Alert published for {} at {}°C",
            line.device_id, line.engine_temp_c
        );
        Ok(true)
    }
}

/// Fixed human-readable alert template
fn alert_message(line: &TelemetryLine) -> String {
    format!(
        "⚠️ Fleet Vehicle Alert !\n\
         \n\
         Vehicle ID: {device_id}\n\
         Timestamp: {timestamp}\n\
         Speed: {speed} km/h\n\
         Fuel Level: {fuel}%\n\
         Engine Temperature: {engine_temp}°C\n\
         \n\
         Engine temperature is above safe threshold. Immediate inspection recommended.\n\
         \n\
         This is an automated alert from the Fleet Monitoring System.\n",
        device_id = line.device_id,
        timestamp = line.timestamp,
        speed = line.speed_kmph,
        fuel = line.fuel_level_percent,
        engine_temp = line.engine_temp_c,
    )
}
