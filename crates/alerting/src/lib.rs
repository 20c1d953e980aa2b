//! Fleet Alerting
//!
//! Evaluates the engine-temperature safety threshold per record and
//! dispatches notifications through a static per-device routing table.

mod alerter;
mod notifier;

pub use alerter::{ThresholdAlerter, ENGINE_TEMP_ALERT_C};
pub use notifier::{MqttConfig, MqttNotifier, Notifier};

use thiserror::Error;

/// Notification channel errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
