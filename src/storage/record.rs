//! Comma-delimited record encodings
//!
//! Records are stored as short ASCII bodies, for example `1020,1,0` for a
//! player rating. Rival stats are always stored in sorted-handle orientation;
//! reorienting them is the rating store's job.

use crate::error::{LadderError, Result};
use crate::types::{BookingRef, PlayerRating, RivalStats};
use std::str::FromStr;

/// A value that can live in the object store
pub trait Record: Sized {
    fn encode(&self) -> String;

    fn decode(raw: &str) -> std::result::Result<Self, String>;
}

/// Decode an object body fetched from `key`
pub fn decode_body<R: Record>(key: &str, body: &[u8]) -> Result<R> {
    let raw = std::str::from_utf8(body).map_err(|e| LadderError::MalformedRecord {
        key: key.to_string(),
        reason: e.to_string(),
    })?;

    R::decode(raw.trim()).map_err(|reason| LadderError::MalformedRecord {
        key: key.to_string(),
        reason,
    })
}

fn split_fields<const N: usize>(raw: &str) -> std::result::Result<[&str; N], String> {
    let fields: Vec<&str> = raw.split(',').collect();
    fields
        .try_into()
        .map_err(|fields: Vec<&str>| format!("expected {} fields, got {}", N, fields.len()))
}

fn parse_field<T: FromStr>(name: &str, value: &str) -> std::result::Result<T, String>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| format!("invalid {} {:?}: {}", name, value, e))
}

impl Record for PlayerRating {
    fn encode(&self) -> String {
        format!("{},{},{}", self.rating, self.wins, self.losses)
    }

    fn decode(raw: &str) -> std::result::Result<Self, String> {
        let [rating, wins, losses] = split_fields::<3>(raw)?;
        Ok(Self {
            rating: parse_field("rating", rating)?,
            wins: parse_field("wins", wins)?,
            losses: parse_field("losses", losses)?,
        })
    }
}

impl Record for RivalStats {
    fn encode(&self) -> String {
        format!("{},{}", self.first, self.second)
    }

    fn decode(raw: &str) -> std::result::Result<Self, String> {
        let [first, second] = split_fields::<2>(raw)?;
        Ok(Self {
            first: parse_field("wins", first)?,
            second: parse_field("wins", second)?,
        })
    }
}

impl Record for BookingRef {
    fn encode(&self) -> String {
        format!("{},{}", self.message_id, self.chat_id)
    }

    fn decode(raw: &str) -> std::result::Result<Self, String> {
        let [message_id, chat_id] = split_fields::<2>(raw)?;
        Ok(Self {
            message_id: parse_field("message id", message_id)?,
            chat_id: parse_field("chat id", chat_id)?,
        })
    }
}
