//! Notification Channel Implementations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rumqttc::{AsyncClient, Event, MqttOptions, QoS};
use serde::Serialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::NotifyError;

/// Publish/subscribe channel seam
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Envelope published to the alert topic
#[derive(Debug, Serialize)]
struct AlertEnvelope<'a> {
    id: Uuid,
    issued_at: DateTime<Utc>,
    subject: &'a str,
    body: &'a str,
}

/// MQTT notifier configuration
#[derive(Debug, Clone)]
pub struct MqttConfig {
    /// MQTT broker host
    pub broker_url: String,
    /// MQTT broker port
    pub broker_port: u16,
    /// Client identifier presented to the broker
    pub client_id: String,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_url: "localhost".to_string(),
            broker_port: 1883,
            client_id: "fleet-monitor".to_string(),
        }
    }
}

/// MQTT-backed notification channel
pub struct MqttNotifier {
    client: AsyncClient,
}

impl MqttNotifier {
    /// Connect to the broker and spawn the event loop handler
    pub fn connect(config: &MqttConfig) -> Self {
        let mut options = MqttOptions::new(
            &config.client_id,
            &config.broker_url,
            config.broker_port,
        );
        options.set_keep_alive(std::time::Duration::from_secs(30));

        let (client, mut eventloop) = AsyncClient::new(options, 10);

        tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(incoming)) => {
                        debug!("MQTT incoming: {:?}", incoming);
                    }
                    Err(e) => {
                        error!("MQTT error: {}", e);
                        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    }
                    _ => {}
                }
            }
        });

        info!("Connected to MQTT broker: {}", config.broker_url);
        Self { client }
    }
}

#[async_trait]
impl Notifier for MqttNotifier {
    async fn publish(&self, topic: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let envelope = AlertEnvelope {
            id: Uuid::new_v4(),
            issued_at: Utc::now(),
            subject,
            body,
        };

        let payload = serde_json::to_vec(&envelope)
            .map_err(|e| NotifyError::Serialization(e.to_string()))?;

        self.client
            .publish(topic, QoS::AtLeastOnce, false, payload)
            .await
            .map_err(|e| NotifyError::Publish(e.to_string()))?;

        Ok(())
    }
}
