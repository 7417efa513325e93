//! Table bookings on top of the object store
//!
//! One object per booked player under `{queue_dir}/{handle}`. The store's
//! modification time is the booking time; nothing else records the order.

use crate::config::StorageSettings;
use crate::error::{LadderError, Result};
use crate::storage::record::decode_body;
use crate::storage::{ObjectStore, Record};
use crate::types::{BookingRef, Handle};
use crate::utils::object_key;
use std::sync::Arc;
use tracing::{debug, warn};

/// Persistent waiting list
#[derive(Clone)]
pub struct QueueStore {
    store: Arc<dyn ObjectStore>,
    queue_dir: String,
}

impl QueueStore {
    pub fn new(store: Arc<dyn ObjectStore>, settings: &StorageSettings) -> Self {
        Self {
            store,
            queue_dir: settings.queue_dir.clone(),
        }
    }

    fn entry_key(&self, handle: &str) -> String {
        object_key(&self.queue_dir, handle)
    }

    /// Append a booking. Does not check for an existing one.
    pub async fn book(&self, handle: &str, booking: BookingRef) -> Result<()> {
        self.store
            .put(&self.entry_key(handle), booking.encode().as_bytes())
            .await?;
        debug!(
            "Booked table for '{}' (message {}, chat {})",
            handle, booking.message_id, booking.chat_id
        );
        Ok(())
    }

    /// Drop a booking; succeeds when there is none
    pub async fn leave(&self, handle: &str) -> Result<()> {
        self.store.delete(&self.entry_key(handle)).await?;
        Ok(())
    }

    /// Booked handles, oldest booking first
    pub async fn ordered_list(&self) -> Result<Vec<Handle>> {
        let prefix = format!("{}/", self.queue_dir);
        let listed = self.store.list(&prefix).await.map_err(|e| {
            warn!("Failed to list queue: {}", e);
            LadderError::from(e)
        })?;

        let mut entries: Vec<_> = listed
            .into_iter()
            .filter_map(|meta| {
                let handle = meta.key.strip_prefix(&prefix)?;
                if handle.is_empty() {
                    return None;
                }
                Some((meta.last_modified, handle.to_string()))
            })
            .collect();

        // Same timestamp falls back to handle order
        entries.sort();
        Ok(entries.into_iter().map(|(_, handle)| handle).collect())
    }

    /// Where to send a notification for `handle`
    pub async fn booking_ref(&self, handle: &str) -> Result<BookingRef> {
        let key = self.entry_key(handle);
        match self.store.get(&key).await? {
            Some(body) => decode_body(&key, &body),
            None => Err(LadderError::BookingNotFound {
                handle: handle.to_string(),
            }),
        }
    }
}
