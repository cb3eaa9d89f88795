use serde::{Deserialize, Serialize};

use super::domain::{FileLocation, FileVerdict};
use super::storage::{ObjectStore, StorageError};

/// Destination buckets a validated file can be routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDestinations {
    pub error_bucket: String,
    pub processed_bucket: String,
}

/// Where a file ended up after a completed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedFile {
    pub bucket: String,
    pub key: String,
}

/// Move the source file to the bucket selected by the verdict, keeping the key.
///
/// The move is copy-then-delete and is not atomic: a failure between the two
/// steps leaves the object present in both buckets, a failure during the copy
/// leaves it only at the source. Neither state is compensated.
pub(crate) fn route_file<S: ObjectStore>(
    store: &S,
    source: &FileLocation,
    verdict: &FileVerdict,
    destinations: &RoutingDestinations,
) -> Result<RoutedFile, StorageError> {
    let destination_bucket = if verdict.is_valid() {
        destinations.processed_bucket.as_str()
    } else {
        destinations.error_bucket.as_str()
    };

    store.copy(source, destination_bucket)?;
    store.delete(source)?;

    Ok(RoutedFile {
        bucket: destination_bucket.to_string(),
        key: source.key.clone(),
    })
}
