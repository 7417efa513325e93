//! Error types for the ladder bot
//!
//! Every core operation returns a [`LadderError`] instead of panicking. Each
//! variant belongs to one [`ErrorKind`], which is what the transport layer
//! uses to decide how loudly to complain.

use crate::types::{Handle, PlayerRating};

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, LadderError>;

/// Coarse classification of a [`LadderError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Something that was asked for is absent. Expected, not a failure.
    NotFound,
    /// The object store could not answer.
    StoreUnavailable,
    /// Malformed arguments, out-of-range scores, duplicates and so on.
    InvalidCommand,
    /// Broken configuration.
    Configuration,
}

/// Custom error types for specific ladder scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LadderError {
    #[error("Player is not registered: {handle}")]
    PlayerNotFound { handle: Handle },

    #[error("No games recorded between {first} and {second}")]
    RivalsNotFound { first: Handle, second: Handle },

    #[error("No booking found for {handle}")]
    BookingNotFound { handle: Handle },

    #[error("Player is not in the queue: {handle}")]
    NotQueued { handle: Handle },

    #[error("The queue is empty")]
    QueueEmpty,

    #[error("Object store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Malformed record under {key}: {reason}")]
    MalformedRecord { key: String, reason: String },

    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Invalid score {first}-{second}: scores must differ and lie in [0, {max}]")]
    InvalidScore { first: u32, second: u32, max: u32 },

    #[error("A player cannot play against themselves: {handle}")]
    SelfPlay { handle: Handle },

    #[error("Player is already registered: {handle}")]
    AlreadyRegistered { handle: Handle, rating: PlayerRating },

    #[error("Player is already at the table: {handle}")]
    AlreadyAtTable { handle: Handle },

    #[error("Player is already waiting at position {position}: {handle}")]
    AlreadyQueued { handle: Handle, position: usize },

    #[error("Command {command} is not allowed: {reason}")]
    AccessDenied { command: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl LadderError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LadderError::PlayerNotFound { .. }
            | LadderError::RivalsNotFound { .. }
            | LadderError::BookingNotFound { .. }
            | LadderError::NotQueued { .. }
            | LadderError::QueueEmpty => ErrorKind::NotFound,
            // A record we cannot decode is as good as a broken store
            LadderError::StoreUnavailable { .. } | LadderError::MalformedRecord { .. } => {
                ErrorKind::StoreUnavailable
            }
            LadderError::InvalidCommand { .. }
            | LadderError::InvalidScore { .. }
            | LadderError::SelfPlay { .. }
            | LadderError::AlreadyRegistered { .. }
            | LadderError::AlreadyAtTable { .. }
            | LadderError::AlreadyQueued { .. }
            | LadderError::AccessDenied { .. } => ErrorKind::InvalidCommand,
            LadderError::ConfigurationError { .. } => ErrorKind::Configuration,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Shorthand for an [`LadderError::InvalidCommand`]
    pub fn invalid(reason: impl Into<String>) -> Self {
        LadderError::InvalidCommand {
            reason: reason.into(),
        }
    }
}
