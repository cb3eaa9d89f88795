use super::domain::FileLocation;

/// Storage abstraction so the pipeline can be exercised in isolation.
///
/// Implementations are expected to be bucket-addressed: `copy` always keeps
/// the source key and only changes the bucket.
pub trait ObjectStore: Send + Sync {
    fn get(&self, location: &FileLocation) -> Result<Vec<u8>, StorageError>;
    fn copy(&self, source: &FileLocation, destination_bucket: &str) -> Result<(), StorageError>;
    fn delete(&self, location: &FileLocation) -> Result<(), StorageError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("object '{key}' not found in bucket '{bucket}'")]
    NotFound { bucket: String, key: String },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn not_found(location: &FileLocation) -> Self {
        Self::NotFound {
            bucket: location.bucket.clone(),
            key: location.key.clone(),
        }
    }
}

/// Trait describing the outbound channel for fetch-failure notices.
pub trait FailureNotifier: Send + Sync {
    fn publish(&self, topic: &str, subject: &str, message: &str) -> Result<(), NotifyError>;
}

/// Notice dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notice transport unavailable: {0}")]
    Transport(String),
}
