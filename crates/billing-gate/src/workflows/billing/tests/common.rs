use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::billing::domain::FileLocation;
use crate::workflows::billing::ingest::{
    BucketRef, ObjectRef, RetryMessage, RetryMessageRecord, UploadEvent, UploadEventRecord,
};
use crate::workflows::billing::routing::RoutingDestinations;
use crate::workflows::billing::storage::{
    FailureNotifier, NotifyError, ObjectStore, StorageError,
};
use crate::workflows::billing::validation::{FileValidator, ValidationRuleSet};
use crate::workflows::billing::{BillingPipelineService, PipelineSettings};

pub(super) const SOURCE_BUCKET: &str = "billing-raw";
pub(super) const ERROR_BUCKET: &str = "billing-errors";
pub(super) const PROCESSED_BUCKET: &str = "billing-processed";
pub(super) const RETRY_TOPIC: &str = "billing-retry-topic";

pub(super) const HEADER: &str =
    "id,customer,contact,country,product_line,quantity,date,currency,amount";

pub(super) const VALID_CSV: &str = "id,customer,contact,country,product_line,quantity,date,currency,amount\n\
1,Acme Foods,jo@acme.test,US,Bakery,4,2024-03-01,USD,10.00\n\
2,Mercado Sur,ana@sur.test,MX,Dairy,2,2024-03-02,MXN,150.50\n";

pub(super) const BAD_PRODUCT_LINE_CSV: &str = "id,customer,contact,country,product_line,quantity,date,currency,amount\n\
1,Acme Foods,jo@acme.test,US,Produce,4,2024-03-01,USD,10.00\n";

pub(super) fn csv_with_rows(rows: &[&str]) -> String {
    let mut payload = String::from(HEADER);
    for row in rows {
        payload.push('\n');
        payload.push_str(row);
    }
    payload.push('\n');
    payload
}

pub(super) fn rule_set() -> ValidationRuleSet {
    ValidationRuleSet::default()
}

pub(super) fn validator() -> FileValidator {
    FileValidator::new(rule_set())
}

pub(super) fn settings() -> PipelineSettings {
    PipelineSettings {
        rules: rule_set(),
        destinations: RoutingDestinations {
            error_bucket: ERROR_BUCKET.to_string(),
            processed_bucket: PROCESSED_BUCKET.to_string(),
        },
        retry_topic: RETRY_TOPIC.to_string(),
    }
}

pub(super) fn source_location(key: &str) -> FileLocation {
    FileLocation::new(SOURCE_BUCKET, key)
}

pub(super) fn upload_event(bucket: &str, key: &str) -> UploadEvent {
    UploadEvent {
        records: vec![UploadEventRecord {
            bucket: BucketRef {
                name: bucket.to_string(),
            },
            object: ObjectRef {
                key: key.to_string(),
            },
        }],
    }
}

pub(super) fn retry_message(body: &str) -> RetryMessage {
    RetryMessage {
        records: vec![RetryMessageRecord {
            body: body.to_string(),
        }],
    }
}

pub(super) fn build_service<S, N>(store: &S, notifier: &N) -> BillingPipelineService<S, N>
where
    S: ObjectStore + Clone + 'static,
    N: FailureNotifier + Clone + 'static,
{
    BillingPipelineService::new(Arc::new(store.clone()), Arc::new(notifier.clone()), settings())
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    objects: Arc<Mutex<HashMap<FileLocation, Vec<u8>>>>,
}

impl MemoryStore {
    pub(super) fn with_object(location: FileLocation, bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::default();
        store.put(location, bytes);
        store
    }

    pub(super) fn put(&self, location: FileLocation, bytes: impl Into<Vec<u8>>) {
        self.objects
            .lock()
            .expect("store mutex poisoned")
            .insert(location, bytes.into());
    }

    pub(super) fn object(&self, location: &FileLocation) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .expect("store mutex poisoned")
            .get(location)
            .cloned()
    }

    pub(super) fn contains(&self, location: &FileLocation) -> bool {
        self.object(location).is_some()
    }
}

impl ObjectStore for MemoryStore {
    fn get(&self, location: &FileLocation) -> Result<Vec<u8>, StorageError> {
        self.object(location)
            .ok_or_else(|| StorageError::not_found(location))
    }

    fn copy(&self, source: &FileLocation, destination_bucket: &str) -> Result<(), StorageError> {
        let bytes = self.get(source)?;
        self.put(
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

/// Store where every call fails, for asserting that a path makes no storage
/// calls at all.
#[derive(Default, Clone)]
pub(super) struct UnavailableStore;

impl ObjectStore for UnavailableStore {
    fn get(&self, _location: &FileLocation) -> Result<Vec<u8>, StorageError> {
        Err(StorageError::Unavailable("storage offline".to_string()))
    }

    fn copy(&self, _source: &FileLocation, _destination_bucket: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage offline".to_string()))
    }

    fn delete(&self, _location: &FileLocation) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage offline".to_string()))
    }
}

/// Store that serves reads but rejects every mutation.
#[derive(Default, Clone)]
pub(super) struct ReadOnlyStore {
    pub(super) inner: MemoryStore,
}

impl ObjectStore for ReadOnlyStore {
    fn get(&self, location: &FileLocation) -> Result<Vec<u8>, StorageError> {
        self.inner.get(location)
    }

    fn copy(&self, _source: &FileLocation, _destination_bucket: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("copy rejected".to_string()))
    }

    fn delete(&self, _location: &FileLocation) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("delete rejected".to_string()))
    }
}

/// Store whose copies land but whose deletes always fail, leaving the object
/// in both buckets.
#[derive(Default, Clone)]
pub(super) struct StickyDeleteStore {
    pub(super) inner: MemoryStore,
}

impl ObjectStore for StickyDeleteStore {
    fn get(&self, location: &FileLocation) -> Result<Vec<u8>, StorageError> {
        self.inner.get(location)
    }

    fn copy(&self, source: &FileLocation, destination_bucket: &str) -> Result<(), StorageError> {
        self.inner.copy(source, destination_bucket)
    }

    fn delete(&self, _location: &FileLocation) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("delete rejected".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PublishedNotice {
    pub(super) topic: String,
    pub(super) subject: String,
    pub(super) message: String,
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    notices: Arc<Mutex<Vec<PublishedNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<PublishedNotice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

impl FailureNotifier for MemoryNotifier {
    fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(PublishedNotice {
                topic: topic.to_string(),
                subject: subject.to_string(),
                message: message.to_string(),
            });
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct FailingNotifier;

impl FailureNotifier for FailingNotifier {
    fn publish(&self, _topic: &str, _subject: &str, _message: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("topic unreachable".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
