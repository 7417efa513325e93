//! In-memory object store
//!
//! Used by tests and by anyone running the bot without persistence. Every
//! write gets a strictly increasing timestamp, so two bookings made within the
//! same clock tick still list in the order they were made.

use crate::storage::object_store::{ObjectMeta, ObjectStore, StoreError, StoreResult};
use crate::utils::current_timestamp;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredObject {
    body: Vec<u8>,
    last_modified: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Objects {
    entries: BTreeMap<String, StoredObject>,
    last_stamp: Option<DateTime<Utc>>,
}

impl Objects {
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = current_timestamp();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

/// Object store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<Objects>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the modification time of an existing object.
    ///
    /// Returns `false` when the key does not exist.
    pub fn set_last_modified(&self, key: &str, last_modified: DateTime<Utc>) -> StoreResult<bool> {
        let mut objects = self.objects.write().map_err(|_| StoreError::Backend {
            message: "Failed to acquire objects write lock".to_string(),
        })?;

        match objects.entries.get_mut(key) {
            Some(object) => {
                object.last_modified = last_modified;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects
            .read()
            .map(|objects| objects.entries.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, body: &[u8]) -> StoreResult<()> {
        let mut objects = self.objects.write().map_err(|_| StoreError::Backend {
            message: "Failed to acquire objects write lock".to_string(),
        })?;

        let last_modified = objects.next_timestamp();
        objects.entries.insert(
            key.to_string(),
            StoredObject {
                body: body.to_vec(),
                last_modified,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let objects = self.objects.read().map_err(|_| StoreError::Backend {
            message: "Failed to acquire objects read lock".to_string(),
        })?;

        Ok(objects.entries.get(key).map(|object| object.body.clone()))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut objects = self.objects.write().map_err(|_| StoreError::Backend {
            message: "Failed to acquire objects write lock".to_string(),
        })?;

        objects.entries.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectMeta>> {
        let objects = self.objects.read().map_err(|_| StoreError::Backend {
            message: "Failed to acquire objects read lock".to_string(),
        })?;

        Ok(objects
            .entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, object)| ObjectMeta {
                key: key.clone(),
                last_modified: object.last_modified,
            })
            .collect())
    }
}
