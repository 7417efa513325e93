//! Chat update and reply definitions
//!
//! Updates arrive as one JSON object per line and replies leave the same
//! way. Only the fields the bot needs are modelled; everything else in an
//! update is ignored.

use crate::error::{LadderError, Result};
use crate::types::{BookingRef, Handle};
use crate::utils::is_valid_handle;
use serde::{Deserialize, Serialize};

/// An incoming chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub message_id: i64,
    pub chat_id: i64,
    /// Title of a group chat; absent for private chats
    #[serde(default)]
    pub chat_title: Option<String>,
    /// Username of the author, without `@`. Not every account has one.
    #[serde(default)]
    pub sender: Option<Handle>,
    #[serde(default)]
    pub text: String,
}

impl InboundMessage {
    /// Reference used to answer this message later
    pub fn origin(&self) -> BookingRef {
        BookingRef {
            message_id: self.message_id,
            chat_id: self.chat_id,
        }
    }

    /// Only text starting with `/` is meant for the bot
    pub fn is_command(&self) -> bool {
        self.text.trim_start().starts_with('/')
    }
}

/// A message the bot sends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundReply {
    pub chat_id: i64,
    pub reply_to_message_id: i64,
    pub text: String,
}

impl OutboundReply {
    pub fn to(target: BookingRef, text: impl Into<String>) -> Self {
        Self {
            chat_id: target.chat_id,
            reply_to_message_id: target.message_id,
            text: text.into(),
        }
    }
}

/// Everything sent in answer to one update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportResponse {
    /// Answer to the sender
    pub reply: OutboundReply,
    /// Message to another player, e.g. the next one in the queue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<OutboundReply>,
}

/// Message serialization and validation utilities
pub struct MessageUtils;

impl MessageUtils {
    /// Deserialize a chat update from bytes
    pub fn deserialize_inbound(bytes: &[u8]) -> Result<InboundMessage> {
        serde_json::from_slice(bytes).map_err(|e| LadderError::InvalidCommand {
            reason: format!("Failed to deserialize update: {}", e),
        })
    }

    /// The sender's handle, if the message can be attributed to one
    pub fn validate_sender(message: &InboundMessage) -> Result<Handle> {
        match message.sender.as_deref().map(str::trim) {
            Some(sender) if !sender.is_empty() => {
                let handle = sender.strip_prefix('@').unwrap_or(sender);
                if is_valid_handle(handle) {
                    Ok(handle.to_string())
                } else {
                    Err(LadderError::invalid(format!(
                        "Sorry, the username {} can't be used with this bot.",
                        handle
                    )))
                }
            }
            _ => Err(LadderError::invalid(
                "Please set a username in your profile to use this bot.",
            )),
        }
    }

    /// Serialize a response as one JSON line, without the trailing newline
    pub fn serialize_response(response: &TransportResponse) -> Result<String> {
        serde_json::to_string(response).map_err(|e| LadderError::InvalidCommand {
            reason: format!("Failed to serialize response: {}", e),
        })
    }
}
