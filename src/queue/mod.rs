//! Shared table queue
//!
//! A single FIFO waiting list for the table. The player booked first is
//! expected to be playing; the rest wait their turn.

pub mod engine;
pub mod storage;

// Re-export commonly used types
pub use engine::{BookingOutcome, LeaveOutcome, QueueEngine, QueueState};
pub use storage::QueueStore;
