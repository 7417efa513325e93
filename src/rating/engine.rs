//! Match resolution and registration
//!
//! Ties the pure [`EloCalculator`] to the [`RatingStore`]. The store does no
//! locking, so two reports touching the same player at the same moment race
//! and the last write wins.

use crate::error::{LadderError, Result};
use crate::rating::calculator::EloCalculator;
use crate::rating::storage::RatingStore;
use crate::types::{MatchResolution, MatchScore, PlayerRating, RatingChange};
use tracing::info;

/// Records matches and registrations against the rating store
#[derive(Clone)]
pub struct RatingEngine {
    store: RatingStore,
    calculator: EloCalculator,
}

impl RatingEngine {
    pub fn new(store: RatingStore, calculator: EloCalculator) -> Self {
        Self { store, calculator }
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    pub fn calculator(&self) -> &EloCalculator {
        &self.calculator
    }

    /// Fails with [`LadderError::AlreadyRegistered`] if `handle` has a rating
    pub async fn ensure_unregistered(&self, handle: &str) -> Result<()> {
        match self.store.get(handle).await {
            Ok(rating) => Err(LadderError::AlreadyRegistered {
                handle: handle.to_string(),
                rating,
            }),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Register a new player at the starting rating
    pub async fn register(&self, handle: &str) -> Result<PlayerRating> {
        self.ensure_unregistered(handle).await?;

        let rating = PlayerRating::new(self.calculator.config().start_rating);
        self.store.set(handle, rating).await?;
        info!("Registered '{}' with rating {}", handle, rating.rating);
        Ok(rating)
    }

    /// Record a game reported by `first` against `second`.
    ///
    /// Checks run in order: score, self-play, then registration of each side,
    /// so an unregistered player is reported by name.
    pub async fn resolve(
        &self,
        first: &str,
        second: &str,
        score: MatchScore,
    ) -> Result<MatchResolution> {
        self.calculator.validate_score(score)?;

        if first == second {
            return Err(LadderError::SelfPlay {
                handle: first.to_string(),
            });
        }

        let old_first = self.store.get(first).await?;
        let old_second = self.store.get(second).await?;

        let (new_first, new_second) = self.calculator.compute(old_first, old_second, score);

        self.store.set(first, new_first).await?;
        self.store.set(second, new_second).await?;
        let rivals = self
            .store
            .increment_rivals(first, second, score.first_won())
            .await?;

        info!(
            "Recorded {} {} {}: {} -> {}, {} -> {}",
            first,
            score,
            second,
            old_first.rating,
            new_first.rating,
            old_second.rating,
            new_second.rating
        );

        Ok(MatchResolution {
            score,
            first: RatingChange {
                handle: first.to_string(),
                old_rating: old_first,
                new_rating: new_first,
            },
            second: RatingChange {
                handle: second.to_string(),
                old_rating: old_second,
                new_rating: new_second,
            },
            rivals,
        })
    }
}
