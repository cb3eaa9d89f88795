use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::domain::{FileLocation, FileVerdict, InvocationOutcome};
use super::ingest::{ExtractionError, IngestTrigger};
use super::notice;
use super::routing::{self, RoutingDestinations};
use super::storage::{FailureNotifier, NotifyError, ObjectStore, StorageError};
use super::validation::{FileValidator, RecordParseError, ValidationRuleSet};

/// Everything the pipeline needs beyond its two ports, read once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    pub rules: ValidationRuleSet,
    pub destinations: RoutingDestinations,
    pub retry_topic: String,
}

/// Service composing ingestion, validation, and routing over the storage and
/// notification ports.
pub struct BillingPipelineService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    validator: FileValidator,
    destinations: RoutingDestinations,
    retry_topic: String,
}

impl<S, N> BillingPipelineService<S, N>
where
    S: ObjectStore + 'static,
    N: FailureNotifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, settings: PipelineSettings) -> Self {
        let PipelineSettings {
            rules,
            destinations,
            retry_topic,
        } = settings;

        Self {
            store,
            notifier,
            validator: FileValidator::new(rules),
            destinations,
            retry_topic,
        }
    }

    /// Run one invocation end to end for any supported trigger shape.
    ///
    /// The four modeled outcomes come back as `Ok`; everything else (short
    /// record, non-numeric amount, empty trigger batch, notice transport
    /// loss) leaves through `Err` without a crafted body.
    pub fn process<T: IngestTrigger>(
        &self,
        trigger: &T,
    ) -> Result<InvocationOutcome, PipelineError> {
        let location = match trigger.source_location() {
            Ok(location) => location,
            Err(err @ ExtractionError::MessageFormat(_)) => {
                warn!(error = %err, "trigger rejected");
                return Ok(InvocationOutcome::InvalidMessage);
            }
            Err(err) => return Err(err.into()),
        };

        let text = match self.fetch_payload(&location) {
            Ok(text) => text,
            Err(err) => {
                error!(
                    bucket = %location.bucket,
                    key = %location.key,
                    error = %err,
                    "failed to read or decode file"
                );
                if T::NOTIFY_ON_FETCH_FAILURE {
                    self.publish_fetch_failure(&location)?;
                }
                return Ok(InvocationOutcome::FetchFailed);
            }
        };

        // The empty check runs on the raw line sequence, before the header
        // skip: a header-only file is not empty and validates zero records.
        let lines: Vec<&str> = text.lines().collect();
        if lines.is_empty() {
            warn!(bucket = %location.bucket, key = %location.key, "file is empty");
            return Ok(InvocationOutcome::EmptyFile);
        }

        let verdict = self.validator.evaluate(&lines)?;
        if let FileVerdict::Invalid {
            record_id,
            violation,
            detail,
        } = &verdict
        {
            warn!(
                bucket = %location.bucket,
                key = %location.key,
                %record_id,
                rule = violation.label(),
                %detail,
                "file failed validation"
            );
        }

        // A failed move does not fail the invocation; the verdict stands even
        // when the file stayed where it was.
        match routing::route_file(self.store.as_ref(), &location, &verdict, &self.destinations) {
            Ok(routed) => {
                info!(destination = %routed.bucket, key = %routed.key, "file moved");
            }
            Err(err) => {
                warn!(
                    bucket = %location.bucket,
                    key = %location.key,
                    error = %err,
                    "failed to move file"
                );
            }
        }

        Ok(InvocationOutcome::Processed { verdict })
    }

    fn fetch_payload(&self, location: &FileLocation) -> Result<String, PayloadFetchError> {
        let bytes = self.store.get(location)?;
        Ok(String::from_utf8(bytes)?)
    }

    fn publish_fetch_failure(&self, location: &FileLocation) -> Result<(), NotifyError> {
        let message = notice::render_failure_notice(location);
        self.notifier
            .publish(&self.retry_topic, notice::FAILURE_NOTICE_SUBJECT, &message)?;

        info!(
            topic = %self.retry_topic,
            bucket = %location.bucket,
            key = %location.key,
            "failure notice published"
        );
        Ok(())
    }
}

/// Errors that escape the orchestrator. None of them carry a modeled outcome;
/// the entry point renders them generically.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Record(#[from] RecordParseError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

#[derive(Debug, thiserror::Error)]
enum PayloadFetchError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("payload is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}
