use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use billing_gate::config::AppConfig;
use billing_gate::workflows::billing::{
    FailureNotifier, FileLocation, NotifyError, ObjectStore, PipelineSettings,
    RoutingDestinations, StorageError, ValidationRuleSet,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for bucket storage, keyed by location. Real
/// deployments swap in an adapter for the durable store; the pipeline only
/// sees the `ObjectStore` trait either way.
#[derive(Default, Clone)]
pub(crate) struct InMemoryObjectStore {
    objects: Arc<Mutex<HashMap<FileLocation, Vec<u8>>>>,
}

impl ObjectStore for InMemoryObjectStore {
    fn get(&self, location: &FileLocation) -> Result<Vec<u8>, StorageError> {
        self.objects
            .lock()
            .expect("store mutex poisoned")
            .get(location)
            .cloned()
            .ok_or_else(|| StorageError::not_found(location))
    }

    fn copy(&self, source: &FileLocation, destination_bucket: &str) -> Result<(), StorageError> {
        let bytes = self.get(source)?;
        self.objects
            .lock()
            .expect("store mutex poisoned")
            .insert(
                FileLocation::new(destination_bucket, source.key.clone()),
                bytes,
            );
        Ok(())
    }

    fn delete(&self, location: &FileLocation) -> Result<(), StorageError> {
        self.objects
            .lock()
            .expect("store mutex poisoned")
            .remove(location)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(location))
    }
}

/// Notifier that emits notices to the log until a queue transport is wired in.
#[derive(Default, Clone)]
pub(crate) struct LogFailureNotifier;

impl FailureNotifier for LogFailureNotifier {
    fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<(), NotifyError> {
        tracing::warn!(%topic, %subject, %message, "failure notice");
        Ok(())
    }
}

pub(crate) fn pipeline_settings(config: &AppConfig) -> PipelineSettings {
    PipelineSettings {
        rules: ValidationRuleSet::default(),
        destinations: RoutingDestinations {
            error_bucket: config.routing.error_bucket.clone(),
            processed_bucket: config.routing.processed_bucket.clone(),
        },
        retry_topic: config.routing.retry_topic.clone(),
    }
}
