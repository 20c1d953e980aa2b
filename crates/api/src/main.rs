//! Fleet Telemetry Pipeline - Main Entry Point

use std::sync::Arc;

use alerting::{MqttConfig, MqttNotifier, ThresholdAlerter};
use api::{init_logging, run_server, AppState};
use classifier::{ClassifierAdapter, HttpInferenceClient, InferenceConfig};
use metric_reporter::{GaugeSink, MetricReporter};
use metrics_exporter_prometheus::PrometheusBuilder;
use pipeline::{HttpSourceStore, Orchestrator, PipelineConfig};
use storage::SqliteStore;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Fleet Telemetry Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let config = PipelineConfig::load()?;

    PrometheusBuilder::new().install()?;

    let source = Arc::new(HttpSourceStore::new(&config.source_base_url));

    let inference = HttpInferenceClient::new(InferenceConfig {
        endpoint_url: config.inference_url.clone(),
        ..InferenceConfig::default()
    })?;
    let classifier = ClassifierAdapter::new(Arc::new(inference));

    let notifier = Arc::new(MqttNotifier::connect(&MqttConfig {
        broker_url: config.broker_url.clone(),
        broker_port: config.broker_port,
        ..MqttConfig::default()
    }));
    let alerter = ThresholdAlerter::new(config.alert_routes.clone(), notifier);

    let reporter = MetricReporter::new(Arc::new(GaugeSink));
    let store = Arc::new(SqliteStore::connect(&config.database_url).await?);

    let orchestrator = Orchestrator::new(config, source, reporter, classifier, alerter, store);
    let state = Arc::new(AppState::new(orchestrator));

    run_server("0.0.0.0:8080", state).await
}
