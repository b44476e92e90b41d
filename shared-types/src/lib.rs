use serde::{Deserialize, Serialize};

pub mod menu;
pub mod navigation;

pub use menu::{Menu, MenuItem, Reply};
pub use navigation::{NavToken, CALLBACK_DATA_LIMIT, LEGACY_QUESTION_PREFIX};

// Shared models for the catalog and the bot

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
