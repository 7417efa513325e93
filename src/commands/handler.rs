//! Command execution against the rating and queue engines

use crate::commands::parse::Command;
use crate::config::{AppConfig, LadderConfig};
use crate::error::{LadderError, Result};
use crate::queue::{BookingOutcome, LeaveOutcome, QueueEngine, QueueState, QueueStore};
use crate::rating::{EloCalculator, RatingEngine, RatingStore};
use crate::storage::ObjectStore;
use crate::types::{BookingRef, Handle, MatchResolution, PlayerRating, RankedPlayer, RivalStats};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Who sent a command and where it can be answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub sender: Handle,
    /// The message carrying the command; also the booking reference for `/book`
    pub origin: BookingRef,
}

/// What a successful command did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Help,
    Registered {
        handle: Handle,
        rating: PlayerRating,
    },
    Deleted {
        handle: Handle,
    },
    Rating {
        handle: Handle,
        rating: PlayerRating,
        /// Asked about themselves
        own: bool,
    },
    RivalStats {
        player: Handle,
        opponent: Handle,
        stats: RivalStats,
    },
    Top {
        players: Vec<RankedPlayer>,
    },
    Queue {
        state: QueueState,
    },
    Booked(BookingOutcome),
    Left(LeaveOutcome),
    QueueCleaned {
        removed: Vec<Handle>,
    },
    MatchRecorded(MatchResolution),
    ScoreSet {
        handle: Handle,
        rating: PlayerRating,
    },
    RivalStatsSet {
        first: Handle,
        second: Handle,
        stats: RivalStats,
    },
}

/// Runs typed commands. Access rules are checked before this point.
#[derive(Clone)]
pub struct CommandHandler {
    ratings: RatingEngine,
    queue: QueueEngine,
    ladder: LadderConfig,
}

impl CommandHandler {
    pub fn new(ratings: RatingEngine, queue: QueueEngine, ladder: LadderConfig) -> Self {
        Self {
            ratings,
            queue,
            ladder,
        }
    }

    /// Wire stores and engines over one object store
    pub fn from_store(store: Arc<dyn ObjectStore>, config: &AppConfig) -> Self {
        let rating_store = RatingStore::new(store.clone(), &config.storage);
        let queue_store = QueueStore::new(store, &config.storage);
        Self::new(
            RatingEngine::new(rating_store, EloCalculator::new(config.ladder.clone())),
            QueueEngine::new(queue_store),
            config.ladder.clone(),
        )
    }

    pub fn ratings(&self) -> &RatingEngine {
        &self.ratings
    }

    pub fn queue(&self) -> &QueueEngine {
        &self.queue
    }

    pub async fn handle(&self, ctx: &CommandContext, command: Command) -> Result<CommandOutcome> {
        debug!("Handling /{} from '{}'", command.name(), ctx.sender);
        let sender = ctx.sender.clone();

        match command {
            Command::Help => Ok(CommandOutcome::Help),

            Command::RegisterMe => {
                let rating = self.ratings.register(&sender).await?;
                Ok(CommandOutcome::Registered {
                    handle: sender,
                    rating,
                })
            }

            Command::DeleteMe => {
                self.ratings.store().delete(&sender).await?;
                info!("Deleted rating of '{}'", sender);
                Ok(CommandOutcome::Deleted { handle: sender })
            }

            Command::MyRating => {
                let rating = self.ratings.store().get(&sender).await?;
                Ok(CommandOutcome::Rating {
                    handle: sender,
                    rating,
                    own: true,
                })
            }

            Command::RatingOf { handle } => {
                let rating = self.ratings.store().get(&handle).await?;
                let own = handle == sender;
                Ok(CommandOutcome::Rating {
                    handle,
                    rating,
                    own,
                })
            }

            Command::StatsVs { opponent } => {
                if opponent == sender {
                    return Err(LadderError::SelfPlay { handle: sender });
                }
                let stats = self.ratings.store().get_rivals(&sender, &opponent).await?;
                Ok(CommandOutcome::RivalStats {
                    player: sender,
                    opponent,
                    stats,
                })
            }

            Command::Top => {
                let players = self
                    .ratings
                    .store()
                    .top(self.ladder.active_top_days)
                    .await?;
                Ok(CommandOutcome::Top { players })
            }

            Command::Queue => Ok(CommandOutcome::Queue {
                state: self.queue.state().await?,
            }),

            Command::Book => Ok(CommandOutcome::Booked(
                self.queue.book(&sender, ctx.origin).await?,
            )),

            Command::Leave => Ok(CommandOutcome::Left(self.queue.leave(&sender).await?)),

            Command::CleanQueue => {
                let removed = self.queue.clean().await?;
                if removed.is_empty() {
                    return Err(LadderError::QueueEmpty);
                }
                Ok(CommandOutcome::QueueCleaned { removed })
            }

            Command::Played { opponent, score } => Ok(CommandOutcome::MatchRecorded(
                self.ratings.resolve(&sender, &opponent, score).await?,
            )),

            Command::SetScore { handle, rating } => {
                let floor = self.ladder.admin_rating_floor();
                if rating.rating <= floor {
                    return Err(LadderError::invalid(format!(
                        "Score should be higher than {}",
                        floor
                    )));
                }
                self.ratings.store().set(&handle, rating).await?;
                info!(
                    "'{}' set rating of '{}' to {} | {} | {}",
                    sender, handle, rating.rating, rating.wins, rating.losses
                );
                Ok(CommandOutcome::ScoreSet { handle, rating })
            }

            Command::SetStatsVs {
                first,
                second,
                stats,
            } => {
                if first == second {
                    return Err(LadderError::SelfPlay { handle: first });
                }
                self.ratings
                    .store()
                    .set_rivals(&first, &second, stats)
                    .await?;
                info!(
                    "'{}' set head-to-head {} {} | {} {}",
                    sender, first, stats.first, stats.second, second
                );
                Ok(CommandOutcome::RivalStatsSet {
                    first,
                    second,
                    stats,
                })
            }
        }
    }
}
