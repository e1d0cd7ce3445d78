//! Storage abstraction trait

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Where an uploaded file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Name under the storage root, `{uuid}-{sanitized original}`.
    pub key: String,
    /// Publicly reachable URL of the file.
    pub url: String,
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under a fresh collision-free key derived from
    /// `original_filename`.
    async fn upload(&self, original_filename: &str, data: Vec<u8>) -> StorageResult<StoredObject>;
}
