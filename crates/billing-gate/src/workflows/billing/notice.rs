//! Failure-notice template shared by the publish path and the retry extractor.
//!
//! The retry queue redelivers the exact sentence published here, so rendering
//! and parsing live in one module; changing either side alone is a
//! wire-contract break for every message already in flight.

use super::domain::FileLocation;

/// Subject line attached to every failure notice.
pub const FAILURE_NOTICE_SUBJECT: &str = "Lambda API Call Failure";

const BUCKET_PREFIX: &str = "for '";
const KEY_PREFIX: &str = "' bucket and file '";
const KEY_SUFFIX: &str = "'";

/// Render the notice published when a file cannot be fetched for validation.
pub fn render_failure_notice(location: &FileLocation) -> String {
    format!(
        "Lambda function failed to reach international taxes API {}{}{}{}{}.",
        BUCKET_PREFIX, location.bucket, KEY_PREFIX, location.key, KEY_SUFFIX
    )
}

/// Recover the file location embedded in a redelivered notice.
///
/// Returns `None` when the body does not contain the expected sentence; the
/// match is non-greedy on both captures, taking the first occurrence of each
/// delimiter.
pub fn parse_failure_notice(message: &str) -> Option<FileLocation> {
    let start = message.find(BUCKET_PREFIX)? + BUCKET_PREFIX.len();
    let rest = &message[start..];

    let bucket_end = rest.find(KEY_PREFIX)?;
    let bucket = &rest[..bucket_end];

    let rest = &rest[bucket_end + KEY_PREFIX.len()..];
    let key_end = rest.find(KEY_SUFFIX)?;
    let key = &rest[..key_end];

    Some(FileLocation::new(bucket, key))
}
