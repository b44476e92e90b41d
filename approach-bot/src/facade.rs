//! Chat-facing side of the bot.
//!
//! Turns `/start` commands and button presses into [`MenuResolver`] calls and
//! renders the resulting [`Reply`] through a [`ChatTransport`]. The start
//! command sends a fresh message; a selection edits the message that carried
//! the pressed button.

use approach_catalog::MenuResolver;
use shared_types::Reply;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::telegram::types::{CallbackQuery, InlineKeyboardMarkup, Update};
use crate::transport::{ChatTransport, TransportError};

pub const START_COMMAND: &str = "/start";

#[derive(Debug, Clone, Copy)]
pub struct PollingOptions {
    /// Pause between two polls
    pub poll_interval: Duration,
    /// Server-side wait of a single `get_updates` call
    pub long_poll_timeout_secs: u64,
}

impl Default for PollingOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            long_poll_timeout_secs: 30,
        }
    }
}

pub struct BotFacade {
    resolver: MenuResolver,
    transport: Arc<dyn ChatTransport>,
}

impl BotFacade {
    pub fn new(resolver: MenuResolver, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            resolver,
            transport,
        }
    }

    /// Send the root topic menu to `chat_id`
    pub async fn on_start(&self, chat_id: i64) -> Result<(), TransportError> {
        info!(chat_id, "Start command received");
        let reply = self.resolver.root().await;
        self.transport
            .send_message(chat_id, reply.body(), keyboard_for(&reply))
            .await
    }

    /// Resolve a button press and show the result in place
    pub async fn on_selection(&self, callback: &CallbackQuery) -> Result<(), TransportError> {
        // An unanswered callback only leaves a spinner on the client
        if let Err(e) = self.transport.answer_callback_query(callback).await {
            warn!(callback_id = %callback.id, error = %e, "Failed to answer callback query");
        }

        let Some(payload) = callback.data.as_deref() else {
            debug!(callback_id = %callback.id, "Callback without data, ignoring");
            return Ok(());
        };

        let reply = self.resolver.select_payload(payload).await;

        match &callback.message {
            Some(message) => {
                self.transport
                    .edit_message_text(
                        message.chat.id,
                        message.message_id,
                        reply.body(),
                        keyboard_for(&reply),
                    )
                    .await
            }
            None => {
                self.transport
                    .send_message(callback.from.id, reply.body(), keyboard_for(&reply))
                    .await
            }
        }
    }

    /// Dispatch a single inbound update
    pub async fn handle_update(&self, update: &Update) -> Result<(), TransportError> {
        if let Some(callback) = &update.callback_query {
            return self.on_selection(callback).await;
        }

        if let Some(message) = &update.message {
            if message.text.as_deref().is_some_and(is_start_command) {
                return self.on_start(message.chat.id).await;
            }
        }

        debug!(update_id = update.update_id, "Ignoring unsupported update");
        Ok(())
    }

    /// Poll for updates until `shutdown` resolves.
    ///
    /// Updates are handled one at a time in arrival order. A failure in one
    /// update or in a poll is logged and the loop carries on.
    pub async fn run_polling<F>(&self, options: PollingOptions, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut offset: Option<i64> = None;
        info!("Bot is polling for updates");

        loop {
            let polled = tokio::select! {
                _ = &mut shutdown => break,
                polled = self.transport.get_updates(offset, options.long_poll_timeout_secs) => polled,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        if let Err(e) = self.handle_update(&update).await {
                            error!(
                                update_id = update.update_id,
                                error = %e,
                                "Update caused an error"
                            );
                        }
                    }
                }
                Err(e) => warn!(error = %e, "Failed to fetch updates"),
            }

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(options.poll_interval) => {}
            }
        }

        info!("Polling stopped");
    }
}

fn keyboard_for(reply: &Reply) -> Option<InlineKeyboardMarkup> {
    match reply {
        Reply::Menu(menu) => Some(InlineKeyboardMarkup::from_items(&menu.items)),
        Reply::Text { .. } => None,
    }
}

/// `/start`, optionally addressed as `/start@botname`, with any arguments
fn is_start_command(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .and_then(|command| command.split('@').next())
        .is_some_and(|command| command == START_COMMAND)
}
