use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::telegram::types::{
    AnswerCallbackQueryRequest, ApiResponse, CallbackQuery, EditMessageTextRequest,
    GetUpdatesRequest, InlineKeyboardMarkup, Message, SendMessageRequest, Update,
};
use crate::transport::{ChatTransport, TransportError};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API client over plain HTTPS
pub struct TelegramClient {
    token: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl TelegramClient {
    /// `request_timeout` must be longer than the long-poll timeout
    pub fn new(token: impl Into<String>, request_timeout: Duration) -> Result<Self, TransportError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(TransportError::authentication("Bot token cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| TransportError::Network { source: e })?;

        Ok(Self {
            token,
            base_url: DEFAULT_API_BASE.to_string(),
            http_client,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);
        debug!(method, "Calling Bot API");

        // The URL embeds the token, keep it out of error messages
        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Network {
                source: e.without_url(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TransportError::Network {
            source: e.without_url(),
        })?;

        match serde_json::from_str::<ApiResponse<T>>(&body) {
            Ok(ApiResponse {
                ok: true,
                result: Some(result),
                ..
            }) => Ok(result),
            Ok(envelope) => {
                let code = envelope.error_code.unwrap_or_else(|| status.as_u16());
                let description = envelope
                    .description
                    .unwrap_or_else(|| "Unknown error".to_string());
                if code == 401 {
                    Err(TransportError::authentication(description))
                } else {
                    Err(TransportError::api_error(code, description))
                }
            }
            Err(_) if !status.is_success() => Err(TransportError::api_error(status.as_u16(), body)),
            Err(e) => Err(TransportError::Parse { source: e }),
        }
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TransportError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: vec!["message".to_string(), "callback_query".to_string()],
        };
        self.call("getUpdates", &request).await
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            reply_markup: keyboard,
        };
        let _: Message = self.call("sendMessage", &request).await?;
        Ok(())
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError> {
        let request = EditMessageTextRequest {
            chat_id,
            message_id,
            text,
            reply_markup: keyboard,
        };
        // Returns the edited Message, or `true` for inline messages
        let _: serde_json::Value = self.call("editMessageText", &request).await?;
        Ok(())
    }

    async fn answer_callback_query(&self, callback: &CallbackQuery) -> Result<(), TransportError> {
        let request = AnswerCallbackQueryRequest {
            callback_query_id: &callback.id,
        };
        let _: bool = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }
}
