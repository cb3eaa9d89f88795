use serde::{Deserialize, Serialize};

use super::domain::FileLocation;
use super::notice;

/// Capability to pull one source file location out of a trigger payload.
///
/// Both entry points feed the same orchestrator; the trigger type decides how
/// the location is extracted and whether a fetch failure publishes a notice.
pub trait IngestTrigger {
    /// Whether a fetch failure for this trigger publishes a failure notice.
    const NOTIFY_ON_FETCH_FAILURE: bool;

    fn source_location(&self) -> Result<FileLocation, ExtractionError>;
}

/// Extraction failures. Only `MessageFormat` is recoverable; an empty batch
/// means the producer broke its contract and the invocation aborts.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("trigger payload contains no records")]
    EmptyBatch,
    #[error("message body does not reference a bucket and file: {0}")]
    MessageFormat(String),
}

/// Structured event emitted when a file lands in the upload bucket.
///
/// Producers batch notifications, but batches are size-1 in practice; only
/// the first record is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadEvent {
    pub records: Vec<UploadEventRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadEventRecord {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

impl IngestTrigger for UploadEvent {
    const NOTIFY_ON_FETCH_FAILURE: bool = true;

    fn source_location(&self) -> Result<FileLocation, ExtractionError> {
        let record = self.records.first().ok_or(ExtractionError::EmptyBatch)?;

        Ok(FileLocation::new(
            record.bucket.name.clone(),
            record.object.key.clone(),
        ))
    }
}

/// Queued retry trigger carrying a redelivered failure notice as free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryMessage {
    pub records: Vec<RetryMessageRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryMessageRecord {
    pub body: String,
}

impl IngestTrigger for RetryMessage {
    const NOTIFY_ON_FETCH_FAILURE: bool = false;

    fn source_location(&self) -> Result<FileLocation, ExtractionError> {
        let record = self.records.first().ok_or(ExtractionError::EmptyBatch)?;

        notice::parse_failure_notice(&record.body)
            .ok_or_else(|| ExtractionError::MessageFormat(record.body.clone()))
    }
}
