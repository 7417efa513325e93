//! Common types used throughout the ladder bot

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Unique player identifier (the chat username)
pub type Handle = String;

/// Rating record for a registered player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRating {
    pub rating: i64,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerRating {
    /// Fresh record for a newly registered player
    pub fn new(rating: i64) -> Self {
        Self {
            rating,
            wins: 0,
            losses: 0,
        }
    }

    /// Key used by the top ranking, compared descending
    pub fn ranking_key(&self) -> (i64, u32, u32) {
        (self.rating, self.wins, self.losses)
    }
}

/// Head-to-head win counts, oriented to the order the caller asked in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RivalStats {
    /// Games won by the first-named player
    pub first: u32,
    /// Games won by the second-named player
    pub second: u32,
}

impl RivalStats {
    pub fn new(first: u32, second: u32) -> Self {
        Self { first, second }
    }

    /// Same stats seen from the other player's side
    pub fn swapped(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }
}

/// Opaque reference back to the chat message that created a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingRef {
    pub message_id: i64,
    pub chat_id: i64,
}

/// Reported game score, first number belongs to the reporting player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchScore {
    pub first: u32,
    pub second: u32,
}

impl MatchScore {
    pub fn new(first: u32, second: u32) -> Self {
        Self { first, second }
    }

    pub fn first_won(&self) -> bool {
        self.first > self.second
    }

    /// Absolute difference between the two sides
    pub fn difference(&self) -> u32 {
        self.first.abs_diff(self.second)
    }
}

impl std::fmt::Display for MatchScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

/// Entry of the top ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub handle: Handle,
    pub rating: PlayerRating,
}

impl RankedPlayer {
    /// Ordering used by the top list: best record first, then handle ascending
    pub fn ranking_order(a: &RankedPlayer, b: &RankedPlayer) -> Ordering {
        b.rating
            .ranking_key()
            .cmp(&a.rating.ranking_key())
            .then_with(|| a.handle.cmp(&b.handle))
    }
}

/// Rating change information for a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub handle: Handle,
    pub old_rating: PlayerRating,
    pub new_rating: PlayerRating,
}

impl RatingChange {
    pub fn delta(&self) -> i64 {
        self.new_rating.rating - self.old_rating.rating
    }
}

/// Everything that happened when a match was recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResolution {
    pub score: MatchScore,
    pub first: RatingChange,
    pub second: RatingChange,
    pub rivals: RivalStats,
}

/// Message that has to reach a player other than the sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub target: Handle,
    pub booking: BookingRef,
}
