//! Pipeline Configuration

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Pipeline configuration.
///
/// Environment variables prefixed with `FLEET_` override the defaults,
/// e.g. `FLEET_SOURCE_CONTAINER` or `FLEET_BROKER_PORT`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// The single source container this pipeline processes
    pub source_container: String,
    /// The single item key within that container
    pub source_key: String,
    /// Blob source base URL
    pub source_base_url: String,
    /// Inference endpoint URL
    pub inference_url: String,
    /// MQTT broker host
    pub broker_url: String,
    /// MQTT broker port
    pub broker_port: u16,
    /// Record store database URL
    pub database_url: String,
    /// Static device-id to alert-topic routing table
    pub alert_routes: HashMap<String, String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_container: "fleet-telemetry".to_string(),
            source_key: "fleet-sentences.txt".to_string(),
            source_base_url: "http://localhost:9000".to_string(),
            inference_url: "http://localhost:8501/invocations".to_string(),
            broker_url: "localhost".to_string(),
            broker_port: 1883,
            database_url: "sqlite://fleet.db".to_string(),
            alert_routes: HashMap::from([
                ("VHC001".to_string(), "fleet/alerts/VHC001".to_string()),
                ("VHC002".to_string(), "fleet/alerts/VHC002".to_string()),
            ]),
        }
    }
}

impl PipelineConfig {
    /// Load the defaults with `FLEET_`-prefixed environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Self::default())?;

        config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::Environment::with_prefix("FLEET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
