//! Update dispatching
//!
//! The [`Dispatcher`] is the only entry point the outside world needs: it
//! takes a chat update, runs the command it carries and always produces a
//! reply. Errors from the core are rendered, never propagated.

use crate::commands::{Command, CommandContext, CommandHandler, CommandOutcome};
use crate::config::AppConfig;
use crate::error::{ErrorKind, LadderError, Result};
use crate::storage::ObjectStore;
use crate::transport::access::AccessPolicy;
use crate::transport::messages::{InboundMessage, MessageUtils, OutboundReply, TransportResponse};
use crate::transport::render::Renderer;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Turns chat updates into replies
#[derive(Clone)]
pub struct Dispatcher {
    handler: CommandHandler,
    policy: AccessPolicy,
    renderer: Renderer,
}

impl Dispatcher {
    pub fn new(handler: CommandHandler, policy: AccessPolicy, renderer: Renderer) -> Self {
        Self {
            handler,
            policy,
            renderer,
        }
    }

    /// Build the whole stack over one object store
    pub fn from_config(store: Arc<dyn ObjectStore>, config: &AppConfig) -> Self {
        Self::new(
            CommandHandler::from_store(store, config),
            AccessPolicy::new(&config.access),
            Renderer::new(config.access.admin_handle.clone()),
        )
    }

    pub fn handler(&self) -> &CommandHandler {
        &self.handler
    }

    /// Handle one raw update. `None` when there is nothing to answer.
    pub async fn dispatch_bytes(&self, bytes: &[u8]) -> Option<TransportResponse> {
        match MessageUtils::deserialize_inbound(bytes) {
            Ok(message) => self.dispatch(&message).await,
            Err(e) => {
                error!("Dropping update: {}", e);
                None
            }
        }
    }

    /// Handle one update. Messages that are not commands get no answer.
    pub async fn dispatch(&self, message: &InboundMessage) -> Option<TransportResponse> {
        if !message.is_command() {
            debug!("Ignoring non-command message {}", message.message_id);
            return None;
        }

        info!(
            "Update received - message_id: {}, chat_id: {}, sender: {:?}",
            message.message_id, message.chat_id, message.sender
        );
        let start_time = Instant::now();

        let result = self.run(message).await;
        let processing_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        let origin = message.origin();
        let response = match result {
            Ok(outcome) => {
                info!(
                    "Update processed - message_id: {}, processing_time: {:.2}ms",
                    message.message_id, processing_ms
                );
                let notification = match &outcome {
                    CommandOutcome::Left(left) => left
                        .notification
                        .as_ref()
                        .map(|n| self.renderer.notification(n)),
                    _ => None,
                };
                TransportResponse {
                    reply: OutboundReply::to(origin, self.renderer.outcome(&outcome)),
                    notification,
                }
            }
            Err(e) => {
                log_failure(message.message_id, processing_ms, &e);
                TransportResponse {
                    reply: OutboundReply::to(origin, self.renderer.error(&e)),
                    notification: None,
                }
            }
        };

        Some(response)
    }

    async fn run(&self, message: &InboundMessage) -> Result<CommandOutcome> {
        let sender = MessageUtils::validate_sender(message)?;
        let command = Command::parse(&message.text)?;
        // An existing registration is reported wherever the request comes from
        if matches!(command, Command::RegisterMe) {
            self.handler.ratings().ensure_unregistered(&sender).await?;
        }
        self.policy
            .check(&command, &sender, message.chat_title.as_deref())?;

        let ctx = CommandContext {
            sender,
            origin: message.origin(),
        };
        self.handler.handle(&ctx, command).await
    }
}

fn log_failure(message_id: i64, processing_ms: f64, e: &LadderError) {
    match e.kind() {
        ErrorKind::NotFound | ErrorKind::InvalidCommand => debug!(
            "Update rejected - message_id: {}, processing_time: {:.2}ms, reason: {}",
            message_id, processing_ms, e
        ),
        ErrorKind::StoreUnavailable => warn!(
            "Update failed - message_id: {}, processing_time: {:.2}ms, error: {}",
            message_id, processing_ms, e
        ),
        ErrorKind::Configuration => error!(
            "Update failed - message_id: {}, processing_time: {:.2}ms, error: {}",
            message_id, processing_ms, e
        ),
    }
}
