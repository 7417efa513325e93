//! Reply texts
//!
//! Turns command outcomes and errors into the short messages posted back to
//! the chat. Nothing here touches storage.

use crate::commands::CommandOutcome;
use crate::error::LadderError;
use crate::queue::QueueState;
use crate::types::{Handle, Notification, PlayerRating, RankedPlayer, RatingChange};
use crate::transport::messages::OutboundReply;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Renders replies; knows the admin so help and error texts can name them
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    admin_handle: Option<Handle>,
}

impl Renderer {
    pub fn new(admin_handle: Option<Handle>) -> Self {
        Self { admin_handle }
    }

    pub fn outcome(&self, outcome: &CommandOutcome) -> String {
        match outcome {
            CommandOutcome::Help => self.help(),
            CommandOutcome::Registered { handle, rating } => {
                format!("Registered @{} with rating = {}.", handle, rating.rating)
            }
            CommandOutcome::Deleted { handle } => format!(
                "Sorry to see you go, @{}. Your rating is deleted from the top.",
                handle
            ),
            CommandOutcome::Rating {
                handle,
                rating,
                own,
            } => {
                if *own {
                    format!("Your rating is {}.", stats_line(rating))
                } else {
                    format!("{}'s rating is {}.", handle, stats_line(rating))
                }
            }
            CommandOutcome::RivalStats {
                player,
                opponent,
                stats,
            } => format!("{} - {} | {} - {}", player, stats.first, stats.second, opponent),
            CommandOutcome::Top { players } => top_list(players),
            CommandOutcome::Queue { state } => match state.owner() {
                Some(owner) => format!(
                    "Expected that {} is playing now.\n{}",
                    owner,
                    waiting_list(state)
                ),
                None => "The queue is empty.".to_string(),
            },
            CommandOutcome::Booked(booking) => {
                if booking.owns_table() {
                    format!(
                        "Table should be empty. You may start playing, @{}",
                        booking.handle
                    )
                } else {
                    format!(
                        "Table is booked.\nExpected that {} is playing now.\n{}",
                        booking.state.owner().unwrap_or_default(),
                        waiting_list(&booking.state)
                    )
                }
            }
            CommandOutcome::Left(left) => format!("Thanks for letting us know, @{}.", left.handle),
            CommandOutcome::QueueCleaned { removed } => format!(
                "Ok, going to clean up the queue with all these guys: {}.",
                mentions(removed)
            ),
            CommandOutcome::MatchRecorded(resolution) => {
                let (first, second) = (&resolution.first, &resolution.second);
                format!(
                    "Rating updates from @{} {} @{}:\n{}\n{}\n#games #{}_games #{}_games",
                    first.handle,
                    resolution.score,
                    second.handle,
                    rating_update(first),
                    rating_update(second),
                    first.handle,
                    second.handle
                )
            }
            CommandOutcome::ScoreSet { handle, rating } => {
                format!("@{}'s rating = {} now.", handle, stats_line(rating))
            }
            CommandOutcome::RivalStatsSet {
                first,
                second,
                stats,
            } => format!(
                "So, now we have {} - {} | {} - {}",
                first, stats.first, stats.second, second
            ),
        }
    }

    pub fn error(&self, error: &LadderError) -> String {
        match error {
            LadderError::PlayerNotFound { handle } => {
                format!("Seems @{} hasn't registered yet.", handle)
            }
            LadderError::RivalsNotFound { first, second } => format!(
                "Seems {} and {} haven't played against each other yet.",
                first, second
            ),
            LadderError::BookingNotFound { handle } => {
                format!("Can't find the booking of @{}.", handle)
            }
            LadderError::NotQueued { .. } => "But you aren't in the queue now.".to_string(),
            LadderError::QueueEmpty => "But the queue is empty...".to_string(),
            LadderError::StoreUnavailable { .. } | LadderError::MalformedRecord { .. } => {
                "Can't reach the records right now, please try again later.".to_string()
            }
            LadderError::InvalidCommand { reason } => reason.clone(),
            LadderError::InvalidScore { first, second, max } => {
                if first == second {
                    "You think I'm funny, yeah? Draws don't count.".to_string()
                } else {
                    format!(
                        "A score of {}-{} can't be right, each side wins from 0 to {} games.",
                        first, second, max
                    )
                }
            }
            LadderError::SelfPlay { handle } => {
                format!("Not sure that {} could play with themself", handle)
            }
            LadderError::AlreadyRegistered { rating, .. } => format!(
                "Seems you've already registered and your rating is {}.",
                stats_line(rating)
            ),
            LadderError::AlreadyAtTable { .. } => {
                "But you should be playing right now, huh?".to_string()
            }
            LadderError::AlreadyQueued { position, .. } => format!(
                "But you're already in the queue, number {} in the waiting list.",
                position
            ),
            LadderError::AccessDenied { reason, .. } => reason.clone(),
            LadderError::ConfigurationError { .. } => match &self.admin_handle {
                Some(admin) => format!("Something is misconfigured, please ask {}.", admin),
                None => "Something is misconfigured.".to_string(),
            },
        }
    }

    /// Message calling the next player to the table, as a reply to their booking
    pub fn notification(&self, notification: &Notification) -> OutboundReply {
        OutboundReply::to(
            notification.booking,
            format!("You're the next in the queue, @{}.", notification.target),
        )
    }

    pub fn help(&self) -> String {
        let admin = self.admin_handle.as_deref().unwrap_or("the admin");
        format!(
            r"Hey, ready to crush some enemies?
These commands will help you to save the results and book the table*:
/help - Post this message
/start - Post this message

Account manipulations:
/register_me - Registration for the new participants (only allowed in the group)
/delete_me - Remove your rating from the competition (but not from the rivals' stats)

Game and ratings:
/played @someone a-b - Declare that you played with someone and the final score is a-b (only allowed in the group)
/my_rating - Post your rating
/rating_of @someone - Post someone's rating
/stats_vs @someone - Your personal stats against @someone
/top - List of top scorers

Queue:
/queue - Get the waiting list state
/book - Add me into the waiting list
/leave - Leave the table (when you finish playing) or leave the queue
/clean_queue - Clean the waiting list if some confusion happened

Admin (only allowed for the administrator of this bot):
/set_score @someone 1 2 3 - Set top stats for @someone with rating=1, wins=2 and losses=3
/set_stats_vs @someone1 @someone2 1 2 - Set rivals stats between @someone1 and @someone2 as 1-2

If something went wrong, please ask the admin of your group ({}) to fix ratings
*We're using a modified Elo rating where the actual game score slightly amplifies the total rating change",
            admin
        )
    }
}

fn stats_line(rating: &PlayerRating) -> String {
    format!("{} | {} | {}", rating.rating, rating.wins, rating.losses)
}

fn rating_update(change: &RatingChange) -> String {
    format!(
        "@{} {} -> {}",
        change.handle, change.old_rating.rating, change.new_rating.rating
    )
}

fn mentions(handles: &[Handle]) -> String {
    handles
        .iter()
        .map(|handle| format!("@{}", handle))
        .collect::<Vec<_>>()
        .join(", ")
}

fn waiting_list(state: &QueueState) -> String {
    let waiters = state.waiters();
    if waiters.is_empty() {
        "The waiting list is empty.".to_string()
    } else {
        format!("The waiting list:\n{}", waiters.join("\n"))
    }
}

fn top_list(players: &[RankedPlayer]) -> String {
    if players.is_empty() {
        return "Nobody has played lately.".to_string();
    }

    let lines: Vec<String> = players
        .iter()
        .enumerate()
        .map(|(place, player)| match MEDALS.get(place) {
            Some(medal) => format!("{} {} = {}", player.handle, medal, stats_line(&player.rating)),
            None => format!("{} = {}", player.handle, stats_line(&player.rating)),
        })
        .collect();

    format!("Active Top\nPlayer = Pts | W | L:\n{}", lines.join("\n"))
}
