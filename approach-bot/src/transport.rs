use crate::telegram::types::{CallbackQuery, InlineKeyboardMarkup, Update};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    /// Missing or rejected bot token
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The chat platform answered with an error
    #[error("API error (status {status}): {description}")]
    Api { status: u16, description: String },

    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

impl TransportError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn api_error(status: u16, description: impl Into<String>) -> Self {
        Self::Api {
            status,
            description: description.into(),
        }
    }
}

/// Outbound side of the chat platform as seen by the bot
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Long-poll for updates with id >= `offset`
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TransportError>;

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError>;

    /// Replace the text and keyboard of a message the bot sent earlier
    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError>;

    /// Acknowledge a button press so the client stops its spinner
    async fn answer_callback_query(&self, callback: &CallbackQuery) -> Result<(), TransportError>;
}
