//! Typed chat commands
//!
//! Chat text like `/played @bob 2-1` is turned into a [`Command`] before it
//! reaches the core, so handlers only ever see well-formed arguments. A
//! leading `@` on handles is optional, a `@botname` suffix on the command is
//! ignored, and anything after the expected arguments is ignored too.

use crate::error::{LadderError, Result};
use crate::types::{Handle, MatchScore, PlayerRating, RivalStats};
use crate::utils::is_valid_handle;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A parsed chat command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Help,
    RegisterMe,
    DeleteMe,
    MyRating,
    RatingOf { handle: Handle },
    StatsVs { opponent: Handle },
    Top,
    Queue,
    Book,
    Leave,
    CleanQueue,
    Played { opponent: Handle, score: MatchScore },
    SetScore { handle: Handle, rating: PlayerRating },
    SetStatsVs { first: Handle, second: Handle, stats: RivalStats },
}

impl Command {
    /// Name of the command as typed in chat, without the slash
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::RegisterMe => "register_me",
            Command::DeleteMe => "delete_me",
            Command::MyRating => "my_rating",
            Command::RatingOf { .. } => "rating_of",
            Command::StatsVs { .. } => "stats_vs",
            Command::Top => "top",
            Command::Queue => "queue",
            Command::Book => "book",
            Command::Leave => "leave",
            Command::CleanQueue => "clean_queue",
            Command::Played { .. } => "played",
            Command::SetScore { .. } => "set_score",
            Command::SetStatsVs { .. } => "set_stats_vs",
        }
    }

    /// Admin-only commands
    pub fn requires_admin(&self) -> bool {
        matches!(self, Command::SetScore { .. } | Command::SetStatsVs { .. })
    }

    /// Commands that only count when posted in the group chat
    pub fn requires_group(&self) -> bool {
        matches!(self, Command::RegisterMe | Command::Played { .. })
    }

    /// Parse a chat message
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = text.split_whitespace();
        let head = tokens
            .next()
            .and_then(|token| token.strip_prefix('/'))
            .ok_or_else(|| LadderError::invalid("Commands start with '/'"))?;
        let name = head.split('@').next().unwrap_or_default();
        let mut args = Arguments {
            command: name,
            tokens,
        };

        let command = match name {
            "help" | "start" => Command::Help,
            "register_me" => Command::RegisterMe,
            "delete_me" => Command::DeleteMe,
            "my_rating" => Command::MyRating,
            "rating_of" => Command::RatingOf {
                handle: args.handle()?,
            },
            "stats_vs" => Command::StatsVs {
                opponent: args.handle()?,
            },
            "top" => Command::Top,
            "queue" => Command::Queue,
            "book" => Command::Book,
            "leave" => Command::Leave,
            "clean_queue" => Command::CleanQueue,
            "played" => Command::Played {
                opponent: args.handle()?,
                score: args.score()?,
            },
            "set_score" => Command::SetScore {
                handle: args.handle()?,
                rating: PlayerRating {
                    rating: args.number()?,
                    wins: args.number()?,
                    losses: args.number()?,
                },
            },
            "set_stats_vs" => Command::SetStatsVs {
                first: args.handle()?,
                second: args.handle()?,
                stats: RivalStats {
                    first: args.number()?,
                    second: args.number()?,
                },
            },
            other => {
                return Err(LadderError::invalid(format!(
                    "Not sure what you meant by /{}.",
                    other
                )))
            }
        };

        Ok(command)
    }
}

/// Example invocation shown when arguments are wrong
pub fn usage(command: &str) -> Option<&'static str> {
    match command {
        "rating_of" => Some("/rating_of @someone"),
        "stats_vs" => Some("/stats_vs @someone"),
        "played" => Some("/played @opponent 2-1"),
        "set_score" => Some("/set_score @someone 1234 10 20"),
        "set_stats_vs" => Some("/set_stats_vs @first @second 10 20"),
        _ => None,
    }
}

struct Arguments<'a, I> {
    command: &'a str,
    tokens: I,
}

impl<'a, I> Arguments<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    fn malformed(&self) -> LadderError {
        match usage(self.command) {
            Some(example) => LadderError::invalid(format!(
                "Something's wrong. You should use \"{}\".",
                example
            )),
            None => LadderError::invalid(format!("Malformed arguments for /{}", self.command)),
        }
    }

    fn next(&mut self) -> Result<&'a str> {
        let token = self.tokens.next();
        token.ok_or_else(|| self.malformed())
    }

    fn handle(&mut self) -> Result<Handle> {
        let token = self.next()?;
        let handle = token.strip_prefix('@').unwrap_or(token);
        if is_valid_handle(handle) {
            Ok(handle.to_string())
        } else {
            Err(self.malformed())
        }
    }

    fn number<T: FromStr>(&mut self) -> Result<T> {
        let token = self.next()?;
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.malformed());
        }
        token.parse().map_err(|_| self.malformed())
    }

    fn score(&mut self) -> Result<MatchScore> {
        let token = self.next()?;
        let parsed = token.split_once('-').and_then(|(first, second)| {
            let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
            if digits(first) && digits(second) {
                Some(MatchScore::new(first.parse().ok()?, second.parse().ok()?))
            } else {
                None
            }
        });
        parsed.ok_or_else(|| self.malformed())
    }
}
