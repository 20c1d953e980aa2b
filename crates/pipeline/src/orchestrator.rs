//! Per-Invocation Orchestration
//!
//! Resolves the triggering descriptors, walks the configured source line
//! by line, and runs extract → metric → classify → alert → normalize →
//! persist for each one, strictly sequentially.

use std::sync::Arc;

use alerting::ThresholdAlerter;
use classifier::ClassifierAdapter;
use metric_reporter::MetricReporter;
use serde::Serialize;
use storage::{decimalize, RecordStore, StoredRecord};
use telemetry::FieldExtractor;
use tracing::{debug, info};

use crate::{PipelineConfig, PipelineError, SourceDescriptor, SourceStore, TriggerEvent};

/// Fixed body returned to the caller on success, regardless of how many
/// lines were actually persisted
pub const SUCCESS_BODY: &str = "Fleet sentences processed successfully";

/// HTTP-style invocation result
#[derive(Debug, Clone, Serialize)]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

/// Sequences the pipeline components for each input line. Collaborator
/// handles are injected once and reused across invocations.
pub struct Orchestrator {
    config: PipelineConfig,
    extractor: FieldExtractor,
    source: Arc<dyn SourceStore>,
    reporter: MetricReporter,
    classifier: ClassifierAdapter,
    alerter: ThresholdAlerter,
    store: Arc<dyn RecordStore>,
}

impl Orchestrator {
    pub fn new(
        config: PipelineConfig,
        source: Arc<dyn SourceStore>,
        reporter: MetricReporter,
        classifier: ClassifierAdapter,
        alerter: ThresholdAlerter,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            config,
            extractor: FieldExtractor::new(),
            source,
            reporter,
            classifier,
            alerter,
            store,
        }
    }

    /// Process one trigger event end to end.
    ///
    /// Collaborator failures (source fetch, metric sink, notification
    /// publish, record store) propagate and abort the invocation; there is
    /// no partial-result checkpointing.
    pub async fn handle(&self, event: TriggerEvent) -> Result<InvocationResponse, PipelineError> {
        let descriptors = self.resolve_sources(event);

        for descriptor in descriptors {
            if descriptor.container != self.config.source_container
                || descriptor.key != self.config.source_key
            {
                debug!(
                    "Skipping unconfigured source {}/{}",
                    descriptor.container, descriptor.key
                );
                continue;
            }

            let content = self
                .source
                .fetch(&descriptor.container, &descriptor.key)
                .await?;

            for line in content.split('\n') {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                self.process_line(line).await?;
            }
        }

        Ok(InvocationResponse {
            status_code: 200,
            body: SUCCESS_BODY.to_string(),
        })
    }

    /// Fallback mode: with no descriptors, synthesize exactly one pointing
    /// at the configured default source
    fn resolve_sources(&self, event: TriggerEvent) -> Vec<SourceDescriptor> {
        if event.descriptors.is_empty() {
            info!(
                "No source descriptors; falling back to {}/{}",
                self.config.source_container, self.config.source_key
            );
            vec![SourceDescriptor::new(
                &self.config.source_container,
                &self.config.source_key,
            )]
        } else {
            event.descriptors
        }
    }

    async fn process_line(&self, raw: &str) -> Result<(), PipelineError> {
        let line = self.extractor.extract(raw);

        self.reporter.report(&line).await?;
        let prediction = self.classifier.classify(&line.raw).await;
        self.alerter.process(&line).await?;

        let record = StoredRecord::new(&line, prediction);
        let item = decimalize(serde_json::to_value(&record)?);

        if line.has_timestamp() {
            self.store.put_record(item).await?;
        } else {
            debug!(
                "Skipping persistence for {}: no timestamp extracted",
                line.device_id
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::{Notifier, NotifyError};
    use async_trait::async_trait;
    use classifier::{ClassifyError, InferenceClient, InferenceResponse};
    use metric_reporter::{MetricError, MetricSink};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use storage::InMemoryStore;

    use crate::SourceError;

    const EXAMPLE_LINE: &str = "device_id VHC001 timestamp 2024-05-01 10:00:00 \
        speed_kmph 80 fuel_level_percent 40 engine_temp_c 105.5 engine running hot";

    struct FakeSource {
        items: HashMap<(String, String), String>,
        fetches: Mutex<Vec<(String, String)>>,
    }

    impl FakeSource {
        fn with_item(container: &str, key: &str, content: &str) -> Self {
            Self {
                items: HashMap::from([(
                    (container.to_string(), key.to_string()),
                    content.to_string(),
                )]),
                fetches: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SourceStore for FakeSource {
        async fn fetch(&self, container: &str, key: &str) -> Result<String, SourceError> {
            self.fetches
                .lock()
                .unwrap()
                .push((container.to_string(), key.to_string()));
            self.items
                .get(&(container.to_string(), key.to_string()))
                .cloned()
                .ok_or_else(|| SourceError::NotFound(container.to_string(), key.to_string()))
        }
    }

    #[derive(Default)]
    struct FakeSink {
        observations: Mutex<Vec<(String, f64)>>,
    }

    #[async_trait]
    impl MetricSink for FakeSink {
        async fn record_engine_temp(
            &self,
            device_id: &str,
            engine_temp_c: f64,
        ) -> Result<(), MetricError> {
            self.observations
                .lock()
                .unwrap()
                .push((device_id.to_string(), engine_temp_c));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        published: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl Notifier for FakeNotifier {
        async fn publish(
            &self,
            topic: &str,
            subject: &str,
            body: &str,
        ) -> Result<(), NotifyError> {
            self.published.lock().unwrap().push((
                topic.to_string(),
                subject.to_string(),
                body.to_string(),
            ));
            Ok(())
        }
    }

    struct FakeInference {
        sentences: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl InferenceClient for FakeInference {
        async fn infer(&self, sentence: &str) -> Result<InferenceResponse, ClassifyError> {
            self.sentences.lock().unwrap().push(sentence.to_string());
            serde_json::from_str(r#"{"probabilities": [0.1, 0.9]}"#)
                .map_err(|e| ClassifyError::InvalidResponse(e.to_string()))
        }
    }

    struct Harness {
        orchestrator: Orchestrator,
        source: Arc<FakeSource>,
        sink: Arc<FakeSink>,
        notifier: Arc<FakeNotifier>,
        inference: Arc<FakeInference>,
        store: Arc<InMemoryStore>,
    }

    fn harness(content: &str) -> Harness {
        let config = PipelineConfig::default();
        let source = Arc::new(FakeSource::with_item(
            &config.source_container,
            &config.source_key,
            content,
        ));
        let sink = Arc::new(FakeSink::default());
        let notifier = Arc::new(FakeNotifier::default());
        let inference = Arc::new(FakeInference {
            sentences: Mutex::new(Vec::new()),
        });
        let store = Arc::new(InMemoryStore::new());

        let orchestrator = Orchestrator::new(
            config.clone(),
            source.clone(),
            MetricReporter::new(sink.clone()),
            ClassifierAdapter::new(inference.clone()),
            ThresholdAlerter::new(config.alert_routes.clone(), notifier.clone()),
            store.clone(),
        );

        Harness {
            orchestrator,
            source,
            sink,
            notifier,
            inference,
            store,
        }
    }

    #[tokio::test]
    async fn example_line_flows_end_to_end() {
        let h = harness(EXAMPLE_LINE);

        let response = h.orchestrator.handle(TriggerEvent::default()).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, SUCCESS_BODY);

        // metric observation
        assert_eq!(
            h.sink.observations.lock().unwrap().as_slice(),
            &[("VHC001".to_string(), 105.5)]
        );

        // classification received the full raw line
        assert_eq!(
            h.inference.sentences.lock().unwrap().as_slice(),
            &[EXAMPLE_LINE.to_string()]
        );

        // alert published through the routing table
        let published = h.notifier.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "fleet/alerts/VHC001");
        assert!(published[0].2.contains("Engine Temperature: 105.5°C"));

        // record persisted with decimalized numerics
        let records = h.store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["timestamp"], json!("2024-05-01 10:00:00"));
        assert_eq!(records[0]["engine_temp_c"], json!("105.5"));
        assert_eq!(records[0]["prediction"]["label"], json!("NEGATIVE"));
        assert_eq!(records[0]["prediction"]["score"], json!("0.9"));
    }

    #[tokio::test]
    async fn tokenless_line_is_never_persisted() {
        let h = harness("engine sounds perfectly normal today");

        h.orchestrator.handle(TriggerEvent::default()).await.unwrap();

        // no timestamp extracted, so the persistence gate closes
        assert!(h.store.is_empty());
        // sentinel-zero temperature, so no metric either
        assert!(h.sink.observations.lock().unwrap().is_empty());
        // classification still ran on the raw text
        assert_eq!(h.inference.sentences.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let h = harness("\n\n  \ndevice_id VHC001 timestamp 2024-05-01 10:00:00\n\n");

        h.orchestrator.handle(TriggerEvent::default()).await.unwrap();

        assert_eq!(h.inference.sentences.lock().unwrap().len(), 1);
        assert_eq!(h.store.len(), 1);
    }

    #[tokio::test]
    async fn mismatched_descriptor_is_skipped_silently() {
        let h = harness(EXAMPLE_LINE);

        let event = TriggerEvent {
            descriptors: vec![SourceDescriptor::new("other-container", "other-key")],
        };
        let response = h.orchestrator.handle(event).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert!(h.source.fetches.lock().unwrap().is_empty());
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn explicit_matching_descriptor_is_processed() {
        let h = harness(EXAMPLE_LINE);
        let config = PipelineConfig::default();

        let event = TriggerEvent {
            descriptors: vec![
                SourceDescriptor::new("other-container", "other-key"),
                SourceDescriptor::new(&config.source_container, &config.source_key),
            ],
        };
        h.orchestrator.handle(event).await.unwrap();

        assert_eq!(h.source.fetches.lock().unwrap().len(), 1);
        assert_eq!(h.store.len(), 1);
    }

    #[tokio::test]
    async fn fallback_mode_synthesizes_the_default_source() {
        let h = harness(EXAMPLE_LINE);

        h.orchestrator.handle(TriggerEvent::default()).await.unwrap();

        let config = PipelineConfig::default();
        assert_eq!(
            h.source.fetches.lock().unwrap().as_slice(),
            &[(config.source_container, config.source_key)]
        );
    }

    #[tokio::test]
    async fn matching_container_with_unconfigured_key_is_skipped() {
        let config = PipelineConfig::default();
        let h = harness(EXAMPLE_LINE);

        let event = TriggerEvent {
            descriptors: vec![SourceDescriptor::new(&config.source_container, "missing")],
        };
        assert!(h.orchestrator.handle(event).await.is_ok());
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn source_fetch_failure_aborts_the_invocation() {
        let config = PipelineConfig::default();
        let empty_source = Arc::new(FakeSource {
            items: HashMap::new(),
            fetches: Mutex::new(Vec::new()),
        });

        let orchestrator = Orchestrator::new(
            config.clone(),
            empty_source,
            MetricReporter::new(Arc::new(FakeSink::default())),
            ClassifierAdapter::new(Arc::new(FakeInference {
                sentences: Mutex::new(Vec::new()),
            })),
            ThresholdAlerter::new(config.alert_routes.clone(), Arc::new(FakeNotifier::default())),
            Arc::new(InMemoryStore::new()),
        );

        let result = orchestrator.handle(TriggerEvent::default()).await;
        assert!(matches!(result, Err(PipelineError::Source(_))));
    }

    #[tokio::test]
    async fn notifier_failure_aborts_the_invocation() {
        struct FailingNotifier;

        #[async_trait]
        impl Notifier for FailingNotifier {
            async fn publish(&self, _: &str, _: &str, _: &str) -> Result<(), NotifyError> {
                Err(NotifyError::Publish("broker unavailable".into()))
            }
        }

        let config = PipelineConfig::default();
        let source = Arc::new(FakeSource::with_item(
            &config.source_container,
            &config.source_key,
            EXAMPLE_LINE,
        ));
        let store = Arc::new(InMemoryStore::new());

        let orchestrator = Orchestrator::new(
            config.clone(),
            source,
            MetricReporter::new(Arc::new(FakeSink::default())),
            ClassifierAdapter::new(Arc::new(FakeInference {
                sentences: Mutex::new(Vec::new()),
            })),
            ThresholdAlerter::new(config.alert_routes.clone(), Arc::new(FailingNotifier)),
            store.clone(),
        );

        let result = orchestrator.handle(TriggerEvent::default()).await;
        assert!(matches!(result, Err(PipelineError::Notify(_))));
        // nothing was persisted for the aborted line
        assert!(store.is_empty());
    }
}
