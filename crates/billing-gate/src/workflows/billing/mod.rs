//! Billing CSV intake, validation, and routing pipeline.
//!
//! A trigger names a file in bucket storage; the pipeline fetches it, applies
//! the record rules, and moves the whole file to the processed or error
//! destination depending on the aggregate verdict. Storage and the failure
//! notice channel are ports so the pipeline can run against anything
//! bucket-shaped.

pub mod domain;
pub mod ingest;
pub mod notice;
pub mod router;
pub mod routing;
pub mod service;
pub mod storage;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{BillingRecord, FileLocation, FileVerdict, InvocationOutcome, RuleViolation};
pub use ingest::{
    BucketRef, ExtractionError, IngestTrigger, ObjectRef, RetryMessage, RetryMessageRecord,
    UploadEvent, UploadEventRecord,
};
pub use router::billing_router;
pub use routing::{RoutedFile, RoutingDestinations};
pub use service::{BillingPipelineService, PipelineError, PipelineSettings};
pub use storage::{FailureNotifier, NotifyError, ObjectStore, StorageError};
pub use validation::{FileValidator, RecordParseError, ValidationRuleSet};
