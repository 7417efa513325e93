//! Rating storage on top of the object store
//!
//! Player records live under `{players_dir}/{handle}`, head-to-head records
//! under `{rivals_dir}/{low}+{high}` where `low` sorts before `high`. Removing
//! a player leaves their head-to-head records in place.

use crate::config::StorageSettings;
use crate::error::{LadderError, Result};
use crate::storage::record::decode_body;
use crate::storage::{ObjectStore, Record};
use crate::types::{PlayerRating, RankedPlayer, RivalStats};
use crate::utils::{activity_horizon, current_timestamp, object_key};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// Player ratings and head-to-head stats
#[derive(Clone)]
pub struct RatingStore {
    store: Arc<dyn ObjectStore>,
    players_dir: String,
    rivals_dir: String,
}

impl RatingStore {
    pub fn new(store: Arc<dyn ObjectStore>, settings: &StorageSettings) -> Self {
        Self {
            store,
            players_dir: settings.players_dir.clone(),
            rivals_dir: settings.rivals_dir.clone(),
        }
    }

    fn player_key(&self, handle: &str) -> String {
        object_key(&self.players_dir, handle)
    }

    /// Storage key for a pair plus whether the caller's order was reversed
    fn rivals_key(&self, first: &str, second: &str) -> (String, bool) {
        if first > second {
            (object_key(&self.rivals_dir, &format!("{}+{}", second, first)), true)
        } else {
            (object_key(&self.rivals_dir, &format!("{}+{}", first, second)), false)
        }
    }

    /// Get a player's rating; [`LadderError::PlayerNotFound`] if unregistered
    pub async fn get(&self, handle: &str) -> Result<PlayerRating> {
        let key = self.player_key(handle);
        match self.store.get(&key).await? {
            Some(body) => decode_body(&key, &body),
            None => {
                debug!("No rating stored for '{}'", handle);
                Err(LadderError::PlayerNotFound {
                    handle: handle.to_string(),
                })
            }
        }
    }

    /// Store a whole rating record, replacing any previous one
    pub async fn set(&self, handle: &str, rating: PlayerRating) -> Result<()> {
        let key = self.player_key(handle);
        self.store.put(&key, rating.encode().as_bytes()).await?;
        debug!(
            "Stored rating for '{}': {} | {} | {}",
            handle, rating.rating, rating.wins, rating.losses
        );
        Ok(())
    }

    /// Remove a player's rating; succeeds when there is nothing to remove
    pub async fn delete(&self, handle: &str) -> Result<()> {
        self.store.delete(&self.player_key(handle)).await?;
        Ok(())
    }

    /// Active players ranked best first.
    ///
    /// Only records modified within the last `activity_window_days` count.
    pub async fn top(&self, activity_window_days: u32) -> Result<Vec<RankedPlayer>> {
        let horizon = activity_horizon(current_timestamp(), activity_window_days);
        self.top_since(horizon).await
    }

    /// Players whose record changed after `horizon`, ranked best first
    pub async fn top_since(&self, horizon: DateTime<Utc>) -> Result<Vec<RankedPlayer>> {
        let prefix = format!("{}/", self.players_dir);
        let listed = self.store.list(&prefix).await.map_err(|e| {
            warn!("Failed to list ratings: {}", e);
            LadderError::from(e)
        })?;

        let mut ranked = Vec::new();
        for meta in listed {
            let handle = match meta.key.strip_prefix(&prefix) {
                Some(handle) if !handle.is_empty() => handle,
                _ => continue,
            };
            if meta.last_modified <= horizon {
                continue;
            }

            match self.get(handle).await {
                Ok(rating) => ranked.push(RankedPlayer {
                    handle: handle.to_string(),
                    rating,
                }),
                // Deleted between listing and reading
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            }
        }

        ranked.sort_by(RankedPlayer::ranking_order);
        debug!("Top ranking has {} active players", ranked.len());
        Ok(ranked)
    }

    /// Head-to-head wins as `(first, second)` in the order asked
    pub async fn get_rivals(&self, first: &str, second: &str) -> Result<RivalStats> {
        let (key, swapped) = self.rivals_key(first, second);
        match self.store.get(&key).await? {
            Some(body) => {
                let stored: RivalStats = decode_body(&key, &body)?;
                Ok(if swapped { stored.swapped() } else { stored })
            }
            None => Err(LadderError::RivalsNotFound {
                first: first.to_string(),
                second: second.to_string(),
            }),
        }
    }

    /// Add one win to whichever side won and return the new stats.
    ///
    /// Read-modify-write without locking: concurrent increments of the same
    /// pair can lose an update.
    pub async fn increment_rivals(
        &self,
        first: &str,
        second: &str,
        first_won: bool,
    ) -> Result<RivalStats> {
        let mut stats = match self.get_rivals(first, second).await {
            Ok(stats) => stats,
            Err(e) if e.is_not_found() => RivalStats::default(),
            Err(e) => return Err(e),
        };

        if first_won {
            stats.first = stats.first.saturating_add(1);
        } else {
            stats.second = stats.second.saturating_add(1);
        }

        self.set_rivals(first, second, stats).await?;
        Ok(stats)
    }

    /// Overwrite head-to-head stats given in the caller's order
    pub async fn set_rivals(&self, first: &str, second: &str, stats: RivalStats) -> Result<()> {
        let (key, swapped) = self.rivals_key(first, second);
        let stored = if swapped { stats.swapped() } else { stats };
        self.store.put(&key, stored.encode().as_bytes()).await?;
        Ok(())
    }
}
