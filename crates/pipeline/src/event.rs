//! Trigger Event Model

use serde::{Deserialize, Serialize};

/// Storage-change notification that triggers one pipeline invocation.
///
/// Zero descriptors means fallback mode: the orchestrator synthesizes one
/// descriptor pointing at the configured default source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerEvent {
    #[serde(default)]
    pub descriptors: Vec<SourceDescriptor>,
}

/// One changed source item: a container plus the item key within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub container: String,
    pub key: String,
}

impl SourceDescriptor {
    pub fn new(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_descriptors_field_decodes_to_empty() {
        let event: TriggerEvent = serde_json::from_str("{}").unwrap();
        assert!(event.descriptors.is_empty());
    }

    #[test]
    fn descriptors_decode_from_json() {
        let event: TriggerEvent = serde_json::from_str(
            r#"{"descriptors": [{"container": "fleet-telemetry", "key": "fleet-sentences.txt"}]}"#,
        )
        .unwrap();

        assert_eq!(
            event.descriptors,
            vec![SourceDescriptor::new("fleet-telemetry", "fleet-sentences.txt")]
        );
    }
}
