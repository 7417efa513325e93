//! Rating and ranking parameters

use serde::{Deserialize, Serialize};

/// Modified Elo parameters and ranking window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderConfig {
    /// Rating given to newly registered players
    pub start_rating: i64,
    /// Elo K factor (maximum swing per unit of achieved-vs-expected score)
    pub k_factor: f64,
    /// Base of the logistic expectation curve
    pub elo_base: f64,
    /// Rating difference that shifts the expectation by one power of the base
    pub elo_scale: f64,
    /// Margin added to every decided game
    pub margin_base: f64,
    /// Extra margin per point of score difference
    pub margin_step: f64,
    /// Highest score either side may report
    pub max_game_score: u32,
    /// Days without a rating change before a player drops out of the top
    pub active_top_days: u32,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            start_rating: 1000,
            k_factor: 40.0,
            elo_base: 10.0,
            elo_scale: 400.0,
            margin_base: 0.1,
            margin_step: 0.2,
            max_game_score: 3,
            active_top_days: 14,
        }
    }
}

impl LadderConfig {
    /// Lowest rating an admin may set by hand (exclusive)
    pub fn admin_rating_floor(&self) -> i64 {
        self.k_factor as i64
    }
}
