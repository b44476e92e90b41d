use crate::models::{Question, Topic};
use async_trait::async_trait;

mod memory;

pub use memory::InMemoryCatalogStore;

/// Document-style catalog store: equality-filtered finds and inserts over the
/// `topics` and `questions` collections. Uniqueness is not enforced here;
/// callers check existence before inserting.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_topics(&self) -> Result<Vec<String>, StorageError>;
    async fn topic_exists(&self, name: &str) -> Result<bool, StorageError>;
    async fn insert_topic(&self, topic: &Topic) -> Result<(), StorageError>;

    async fn list_questions(&self, topic: &str) -> Result<Vec<String>, StorageError>;
    async fn find_question(&self, question_text: &str) -> Result<Option<Question>, StorageError>;
    async fn find_question_in_topic(
        &self,
        topic: &str,
        question_text: &str,
    ) -> Result<Option<Question>, StorageError>;
    async fn question_exists(&self, topic: &str, question_text: &str)
        -> Result<bool, StorageError>;
    async fn insert_question(&self, question: &Question) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::OperationFailed(err.to_string())
    }
}
