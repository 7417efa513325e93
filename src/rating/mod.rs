//! Rating system: modified Elo with head-to-head tracking
//!
//! This module provides the rating math, rating persistence on top of the
//! object store, and the engine that records matches.

pub mod calculator;
pub mod engine;
pub mod storage;

// Re-export commonly used types
pub use calculator::EloCalculator;
pub use engine::RatingEngine;
pub use storage::RatingStore;
