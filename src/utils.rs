//! Utility functions for the ladder bot

use chrono::{DateTime, Duration, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Oldest modification time still counted as active
pub fn activity_horizon(now: DateTime<Utc>, window_days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(window_days))
}

/// Handles are chat usernames: ASCII letters, digits and underscores
pub fn is_valid_handle(handle: &str) -> bool {
    !handle.is_empty()
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Join a directory-like prefix and a name into an object key
pub fn object_key(dir: &str, name: &str) -> String {
    format!("{}/{}", dir, name)
}
