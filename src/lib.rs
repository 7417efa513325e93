//! Table Ladder - Elo ladder and table queue for a chat group
//!
//! This crate records games between registered players with a modified Elo
//! rating, keeps head-to-head stats and a FIFO booking queue for a shared
//! table, all on top of a plain key-value object store.

pub mod commands;
pub mod config;
pub mod error;
pub mod queue;
pub mod rating;
pub mod storage;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{ErrorKind, LadderError, Result};
pub use types::*;

// Re-export key components
pub use commands::{Command, CommandHandler, CommandOutcome};
pub use storage::{FsObjectStore, InMemoryObjectStore, ObjectStore};
pub use transport::Dispatcher;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
