//! Chat command surface
//!
//! [`parse`] turns chat text into a typed [`Command`], [`handler`] runs it
//! against the rating and queue engines.

pub mod handler;
pub mod parse;

// Re-export commonly used types
pub use handler::{CommandContext, CommandHandler, CommandOutcome};
pub use parse::Command;
