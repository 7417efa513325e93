//! Configuration management for the ladder bot
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;
pub mod ladder;

// Re-export commonly used types
pub use app::{validate_config, AccessSettings, AppConfig, ServiceSettings, StorageSettings};
pub use ladder::LadderConfig;
