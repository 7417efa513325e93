//! Modified Elo calculator
//!
//! Classic Elo maps a game to an achieved score of 1 or 0. Here the achieved
//! score is `0.5 ± margin`, where the margin grows with the score difference,
//! so a 3-0 moves ratings further than a 3-2.
//!
//! New ratings are truncated toward zero, not rounded. Existing ladders were
//! built with that truncation and results must stay reproducible, so keep it.

use crate::config::LadderConfig;
use crate::error::{LadderError, Result};
use crate::types::{MatchScore, PlayerRating};

/// Pure rating math, no storage access
#[derive(Debug, Clone)]
pub struct EloCalculator {
    config: LadderConfig,
}

impl Default for EloCalculator {
    fn default() -> Self {
        Self::new(LadderConfig::default())
    }
}

impl EloCalculator {
    pub fn new(config: LadderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LadderConfig {
        &self.config
    }

    /// Reject draws and scores outside `[0, max_game_score]`
    pub fn validate_score(&self, score: MatchScore) -> Result<()> {
        let max = self.config.max_game_score;
        if score.first == score.second || score.first > max || score.second > max {
            return Err(LadderError::InvalidScore {
                first: score.first,
                second: score.second,
                max,
            });
        }
        Ok(())
    }

    /// How far the achieved score departs from 0.5
    pub fn score_margin(&self, score: MatchScore) -> f64 {
        self.config.margin_base + score.difference() as f64 * self.config.margin_step
    }

    /// Expected score of a player rated `rating` against `opponent`
    pub fn expected_score(&self, rating: i64, opponent: i64) -> f64 {
        1.0 / (1.0
            + self
                .config
                .elo_base
                .powf((opponent - rating) as f64 / self.config.elo_scale))
    }

    /// Achieved scores of (first, second)
    pub fn achieved_scores(&self, score: MatchScore) -> (f64, f64) {
        let margin = self.score_margin(score);
        if score.first_won() {
            (0.5 + margin, 0.5 - margin)
        } else {
            (0.5 - margin, 0.5 + margin)
        }
    }

    fn updated_rating(&self, rating: i64, achieved: f64, expected: f64) -> i64 {
        // `as` truncates toward zero
        (rating as f64 + self.config.k_factor * (achieved - expected)) as i64
    }

    /// New records for both players after `score` was reported.
    ///
    /// The score must already be valid; see [`EloCalculator::validate_score`].
    pub fn compute(
        &self,
        first: PlayerRating,
        second: PlayerRating,
        score: MatchScore,
    ) -> (PlayerRating, PlayerRating) {
        let (achieved_first, achieved_second) = self.achieved_scores(score);

        let mut new_first = PlayerRating {
            rating: self.updated_rating(
                first.rating,
                achieved_first,
                self.expected_score(first.rating, second.rating),
            ),
            ..first
        };
        let mut new_second = PlayerRating {
            rating: self.updated_rating(
                second.rating,
                achieved_second,
                self.expected_score(second.rating, first.rating),
            ),
            ..second
        };

        if score.first_won() {
            new_first.wins = new_first.wins.saturating_add(1);
            new_second.losses = new_second.losses.saturating_add(1);
        } else {
            new_second.wins = new_second.wins.saturating_add(1);
            new_first.losses = new_first.losses.saturating_add(1);
        }

        (new_first, new_second)
    }
}
