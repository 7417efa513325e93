//! Object store interface

use crate::error::LadderError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a raw object store call
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures raised by an object store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid object key: {key}")]
    InvalidKey { key: String },

    #[error("Storage backend error: {message}")]
    Backend { message: String },
}

impl From<StoreError> for LadderError {
    fn from(error: StoreError) -> Self {
        LadderError::StoreUnavailable {
            message: error.to_string(),
        }
    }
}

/// Listing entry: key plus the store-assigned modification time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub key: String,
    pub last_modified: DateTime<Utc>,
}

/// Flat key-value store with per-object modification times
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create or overwrite an object; refreshes its modification time
    async fn put(&self, key: &str, body: &[u8]) -> StoreResult<()>;

    /// Fetch an object, `None` when it does not exist
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Remove an object; removing a missing object succeeds
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// All objects whose key starts with `prefix`
    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectMeta>>;
}
