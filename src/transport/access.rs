//! Who may run which command, and where

use crate::commands::Command;
use crate::config::AccessSettings;
use crate::error::{LadderError, Result};
use crate::types::Handle;

/// Admin and group-chat restrictions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    admin_handle: Option<Handle>,
    group_name: Option<String>,
}

impl AccessPolicy {
    pub fn new(settings: &AccessSettings) -> Self {
        Self {
            admin_handle: settings.admin_handle.clone(),
            group_name: settings.group_name.clone(),
        }
    }

    pub fn admin_handle(&self) -> Option<&str> {
        self.admin_handle.as_deref()
    }

    pub fn is_admin(&self, sender: &str) -> bool {
        self.admin_handle.as_deref() == Some(sender)
    }

    /// Check `command` sent by `sender` in a chat titled `chat_title`.
    ///
    /// Without a configured admin nobody may run admin commands. Without a
    /// configured group, group-only commands are allowed in any chat.
    pub fn check(&self, command: &Command, sender: &str, chat_title: Option<&str>) -> Result<()> {
        if command.requires_admin() && !self.is_admin(sender) {
            let reason = match &self.admin_handle {
                Some(admin) => format!("Allowed only for {}", admin),
                None => "No admin is configured for this bot".to_string(),
            };
            return Err(LadderError::AccessDenied {
                command: command.name().to_string(),
                reason,
            });
        }

        if command.requires_group() {
            let Some(group) = self.group_name.as_deref() else {
                return Ok(());
            };
            if chat_title == Some(group) {
                return Ok(());
            }
            // The admin may record games from anywhere
            if matches!(command, Command::Played { .. }) && self.is_admin(sender) {
                return Ok(());
            }

            let what = match command {
                Command::RegisterMe => "the registration",
                _ => "reporting games",
            };
            return Err(LadderError::AccessDenied {
                command: command.name().to_string(),
                reason: format!("Sorry, {} is allowed only at the group {}.", what, group),
            });
        }

        Ok(())
    }
}
