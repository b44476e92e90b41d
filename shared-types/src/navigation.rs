use serde::{Deserialize, Serialize};

/// Maximum callback payload size accepted by the Telegram Bot API
pub const CALLBACK_DATA_LIMIT: usize = 64;

/// Prefix used by plain-string question payloads from earlier deployments
pub const LEGACY_QUESTION_PREFIX: &str = "question:";

/// Navigation token carried in a button's callback payload.
///
/// Structured tokens are compact JSON objects: `{"t":"<topic>"}` selects a
/// topic and `{"t":"<topic>","q":"<question>"}` selects a question. The
/// presence of `q` is the discriminator, so a topic name can never be
/// mistaken for a question whatever characters it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavToken {
    Question {
        #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
        #[serde(rename = "q")]
        text: String,
    },
    Topic {
        #[serde(rename = "t")]
        name: String,
    },
}

impl NavToken {
    pub fn topic(name: impl Into<String>) -> Self {
        NavToken::Topic { name: name.into() }
    }

    pub fn question(topic: impl Into<String>, text: impl Into<String>) -> Self {
        NavToken::Question {
            topic: Some(topic.into()),
            text: text.into(),
        }
    }

    /// Question token for a menu button.
    ///
    /// Keeps the topic when the payload fits in [`CALLBACK_DATA_LIMIT`],
    /// otherwise drops it and the question is looked up by text alone.
    pub fn question_button(topic: impl Into<String>, text: impl Into<String>) -> Self {
        let qualified = Self::question(topic, text);
        if qualified.fits_callback_data() {
            return qualified;
        }
        match qualified {
            NavToken::Question { text, .. } => NavToken::Question { topic: None, text },
            other => other,
        }
    }

    /// Encode as the compact JSON payload placed in `callback_data`
    pub fn encode(&self) -> String {
        // Plain string fields always serialize
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Decode a callback payload.
    ///
    /// Structured JSON payloads are tried first. Anything else is treated as a
    /// legacy plain-string payload: `question:<text>` selects a question
    /// without topic context, every other string names a topic.
    pub fn decode(payload: &str) -> Self {
        if payload.starts_with('{') {
            if let Ok(token) = serde_json::from_str::<NavToken>(payload) {
                return token;
            }
        }

        match payload.strip_prefix(LEGACY_QUESTION_PREFIX) {
            Some(text) => NavToken::Question {
                topic: None,
                text: text.to_string(),
            },
            None => NavToken::Topic {
                name: payload.to_string(),
            },
        }
    }

    /// Whether the encoded payload fits in a Telegram callback button
    pub fn fits_callback_data(&self) -> bool {
        self.encode().len() <= CALLBACK_DATA_LIMIT
    }
}
