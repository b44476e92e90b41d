#![allow(dead_code)]

use approach_bot::telegram::types::{
    CallbackQuery, Chat, InlineKeyboardMarkup, Message, Update, User,
};
use approach_bot::{BotFacade, ChatTransport, TransportError};
use approach_catalog::{CatalogClient, ImportLoader, ImportRow, InMemoryCatalogStore, MenuResolver};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Outbound call recorded by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Sent {
        chat_id: i64,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    Edited {
        chat_id: i64,
        message_id: i64,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
}

impl Outbound {
    pub fn text(&self) -> &str {
        match self {
            Outbound::Sent { text, .. } | Outbound::Edited { text, .. } => text,
        }
    }

    pub fn button_labels(&self) -> Vec<String> {
        let keyboard = match self {
            Outbound::Sent { keyboard, .. } | Outbound::Edited { keyboard, .. } => keyboard,
        };
        keyboard
            .iter()
            .flat_map(|k| k.buttons())
            .map(|b| b.text.clone())
            .collect()
    }

    pub fn button_payloads(&self) -> Vec<String> {
        let keyboard = match self {
            Outbound::Sent { keyboard, .. } | Outbound::Edited { keyboard, .. } => keyboard,
        };
        keyboard
            .iter()
            .flat_map(|k| k.buttons())
            .map(|b| b.callback_data.clone())
            .collect()
    }
}

pub struct MockTransport {
    pub batches: Mutex<VecDeque<Vec<Update>>>,
    pub offsets: Mutex<Vec<Option<i64>>>,
    pub outbound: Mutex<Vec<Outbound>>,
    pub answered: Mutex<Vec<String>>,
    /// Sends and edits to this chat fail
    pub failing_chat: Mutex<Option<i64>>,
    /// Number of upcoming polls that fail before batches are handed out
    pub failing_polls: Mutex<usize>,
    pub drained: Notify,
}

impl MockTransport {
    pub fn new() -> Self {
        MockTransport {
            batches: Mutex::new(VecDeque::new()),
            offsets: Mutex::new(Vec::new()),
            outbound: Mutex::new(Vec::new()),
            answered: Mutex::new(Vec::new()),
            failing_chat: Mutex::new(None),
            failing_polls: Mutex::new(0),
            drained: Notify::new(),
        }
    }

    pub fn with_batches(batches: Vec<Vec<Update>>) -> Self {
        let transport = Self::new();
        *transport.batches.lock().unwrap() = batches.into();
        transport
    }

    pub fn fail_chat(&self, chat_id: i64) {
        *self.failing_chat.lock().unwrap() = Some(chat_id);
    }

    pub fn fail_polls(&self, count: usize) {
        *self.failing_polls.lock().unwrap() = count;
    }

    pub fn outbound(&self) -> Vec<Outbound> {
        self.outbound.lock().unwrap().clone()
    }

    pub fn last_outbound(&self) -> Outbound {
        self.outbound
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no outbound message recorded")
    }

    /// Resolves once every queued batch was handed out
    pub async fn wait_drained(&self) {
        self.drained.notified().await
    }

    fn check_chat(&self, chat_id: i64) -> Result<(), TransportError> {
        if *self.failing_chat.lock().unwrap() == Some(chat_id) {
            return Err(TransportError::api_error(403, "Forbidden: bot was blocked by the user"));
        }
        Ok(())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ChatTransport for MockTransport {
    async fn get_updates(
        &self,
        offset: Option<i64>,
        _timeout_secs: u64,
    ) -> Result<Vec<Update>, TransportError> {
        self.offsets.lock().unwrap().push(offset);
        {
            let mut failing = self.failing_polls.lock().unwrap();
            if *failing > 0 {
                *failing -= 1;
                return Err(TransportError::api_error(502, "Bad Gateway"));
            }
        }
        let next = self.batches.lock().unwrap().pop_front();
        match next {
            Some(batch) => Ok(batch),
            None => {
                self.drained.notify_one();
                Ok(Vec::new())
            }
        }
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError> {
        self.check_chat(chat_id)?;
        self.outbound.lock().unwrap().push(Outbound::Sent {
            chat_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError> {
        self.check_chat(chat_id)?;
        self.outbound.lock().unwrap().push(Outbound::Edited {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn answer_callback_query(&self, callback: &CallbackQuery) -> Result<(), TransportError> {
        self.answered.lock().unwrap().push(callback.id.clone());
        Ok(())
    }
}

pub fn sample_rows() -> Vec<ImportRow> {
    vec![
        ImportRow::new("Arrays", "What is 2-sum?", "Use a hashmap", "Track complements"),
        ImportRow::new("Arrays", "Reverse array", "Two pointers", "Swap ends"),
        ImportRow::new("Graphs", "Detect a cycle", "DFS with colors", "Back edges"),
    ]
}

/// Façade over an in-memory catalog seeded with [`sample_rows`]
pub async fn setup_facade(transport: Arc<MockTransport>) -> BotFacade {
    setup_facade_with(transport, sample_rows()).await
}

pub async fn setup_facade_with(transport: Arc<MockTransport>, rows: Vec<ImportRow>) -> BotFacade {
    let catalog = CatalogClient::new(Arc::new(InMemoryCatalogStore::new()));
    ImportLoader::new(catalog.clone()).import_rows(rows).await;
    BotFacade::new(MenuResolver::new(catalog), transport)
}

pub fn start_update(update_id: i64, chat_id: i64) -> Update {
    Update {
        update_id,
        message: Some(Message {
            message_id: update_id * 10,
            chat: Chat { id: chat_id },
            text: Some("/start".to_string()),
        }),
        callback_query: None,
    }
}

pub fn callback_update(update_id: i64, chat_id: i64, message_id: i64, data: &str) -> Update {
    Update {
        update_id,
        message: None,
        callback_query: Some(callback(chat_id, message_id, data)),
    }
}

pub fn callback(chat_id: i64, message_id: i64, data: &str) -> CallbackQuery {
    CallbackQuery {
        id: format!("cb-{chat_id}-{message_id}"),
        from: User { id: chat_id },
        message: Some(Message {
            message_id,
            chat: Chat { id: chat_id },
            text: None,
        }),
        data: Some(data.to_string()),
    }
}
