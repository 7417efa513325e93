//! Table queue state machine
//!
//! The queue is derived entirely from [`QueueStore::ordered_list`]: the oldest
//! booking is at the table, everyone after it waits in booking order. There is
//! no separate owner record to keep in sync.

use crate::error::{LadderError, Result};
use crate::queue::storage::QueueStore;
use crate::types::{BookingRef, Handle, Notification};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Shape of the queue as a whole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueState {
    /// Nobody at the table
    Empty,
    /// Someone at the table, nobody waiting
    Occupied { owner: Handle },
    /// Someone at the table and at least one player waiting
    OccupiedWithWaiters { owner: Handle, waiters: Vec<Handle> },
}

impl QueueState {
    /// Build the state from handles in booking order
    pub fn from_list(mut handles: Vec<Handle>) -> Self {
        if handles.is_empty() {
            return QueueState::Empty;
        }

        let owner = handles.remove(0);
        if handles.is_empty() {
            QueueState::Occupied { owner }
        } else {
            QueueState::OccupiedWithWaiters {
                owner,
                waiters: handles,
            }
        }
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            QueueState::Empty => None,
            QueueState::Occupied { owner } | QueueState::OccupiedWithWaiters { owner, .. } => {
                Some(owner)
            }
        }
    }

    pub fn waiters(&self) -> &[Handle] {
        match self {
            QueueState::OccupiedWithWaiters { waiters, .. } => waiters,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, QueueState::Empty)
    }

    /// Everyone in the queue, owner first
    pub fn handles(&self) -> Vec<Handle> {
        self.owner()
            .map(str::to_string)
            .into_iter()
            .chain(self.waiters().iter().cloned())
            .collect()
    }

    /// 0 for the owner, 1.. for waiters
    pub fn position_of(&self, handle: &str) -> Option<usize> {
        if self.owner() == Some(handle) {
            return Some(0);
        }
        self.waiters()
            .iter()
            .position(|waiter| waiter == handle)
            .map(|index| index + 1)
    }
}

/// Result of a successful booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingOutcome {
    pub handle: Handle,
    /// Queue after the booking
    pub state: QueueState,
}

impl BookingOutcome {
    pub fn owns_table(&self) -> bool {
        self.state.owner() == Some(self.handle.as_str())
    }
}

/// Result of a successful leave
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveOutcome {
    pub handle: Handle,
    /// Position the player left from
    pub position: usize,
    /// Queue after leaving
    pub state: QueueState,
    /// Next player to call to the table, if any
    pub notification: Option<Notification>,
}

/// Booking, leaving and clearing the table queue
#[derive(Clone)]
pub struct QueueEngine {
    store: QueueStore,
}

impl QueueEngine {
    pub fn new(store: QueueStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &QueueStore {
        &self.store
    }

    /// Current queue
    pub async fn state(&self) -> Result<QueueState> {
        Ok(QueueState::from_list(self.store.ordered_list().await?))
    }

    /// Put `handle` at the end of the queue.
    ///
    /// A player already at the table or already waiting is rejected.
    pub async fn book(&self, handle: &str, booking: BookingRef) -> Result<BookingOutcome> {
        let mut handles = self.store.ordered_list().await?;

        match handles.iter().position(|h| h == handle) {
            Some(0) => {
                return Err(LadderError::AlreadyAtTable {
                    handle: handle.to_string(),
                })
            }
            Some(position) => {
                return Err(LadderError::AlreadyQueued {
                    handle: handle.to_string(),
                    position,
                })
            }
            None => {}
        }

        self.store.book(handle, booking).await?;
        handles.push(handle.to_string());

        let outcome = BookingOutcome {
            handle: handle.to_string(),
            state: QueueState::from_list(handles),
        };
        info!(
            "'{}' booked the table (owner: {:?}, waiting: {})",
            handle,
            outcome.state.owner(),
            outcome.state.waiters().len()
        );
        Ok(outcome)
    }

    /// Take `handle` out of the queue.
    ///
    /// When the player at the table leaves and someone is waiting, the next
    /// player gets a notification routed to their booking message. Without a
    /// booking reference the notification is skipped.
    pub async fn leave(&self, handle: &str) -> Result<LeaveOutcome> {
        let mut handles = self.store.ordered_list().await?;
        if handles.is_empty() {
            return Err(LadderError::QueueEmpty);
        }

        let position = handles
            .iter()
            .position(|h| h == handle)
            .ok_or_else(|| LadderError::NotQueued {
                handle: handle.to_string(),
            })?;

        self.store.leave(handle).await?;
        handles.remove(position);

        let notification = match handles.first() {
            Some(next) if position == 0 => self.notification_for(next).await,
            _ => None,
        };

        info!(
            "'{}' left the queue from position {}, {} remaining",
            handle,
            position,
            handles.len()
        );

        Ok(LeaveOutcome {
            handle: handle.to_string(),
            position,
            state: QueueState::from_list(handles),
            notification,
        })
    }

    async fn notification_for(&self, next: &str) -> Option<Notification> {
        match self.store.booking_ref(next).await {
            Ok(booking) => Some(Notification {
                target: next.to_string(),
                booking,
            }),
            Err(e) if e.is_not_found() => {
                debug!("No booking reference for '{}', skipping notification", next);
                None
            }
            Err(e) => {
                warn!("Could not read booking of '{}': {}", next, e);
                None
            }
        }
    }

    /// Remove everyone from the queue without notifying anybody.
    ///
    /// Returns the removed handles in queue order.
    pub async fn clean(&self) -> Result<Vec<Handle>> {
        let handles = self.store.ordered_list().await?;
        for handle in &handles {
            self.store.leave(handle).await?;
        }

        if !handles.is_empty() {
            info!("Cleaned the queue: {}", handles.join(", "));
        }
        Ok(handles)
    }
}
