use crate::models::{Question, Topic};
use crate::storage::{CatalogStore, StorageError};
use std::sync::{Arc, Mutex, MutexGuard};

/// Catalog kept in process memory, in insertion order
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    topics: Arc<Mutex<Vec<Topic>>>,
    questions: Arc<Mutex<Vec<Question>>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic_count(&self) -> Result<usize, StorageError> {
        Ok(self.topics()?.len())
    }

    pub fn question_count(&self) -> Result<usize, StorageError> {
        Ok(self.questions()?.len())
    }

    fn topics(&self) -> Result<MutexGuard<'_, Vec<Topic>>, StorageError> {
        self.topics
            .lock()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))
    }

    fn questions(&self) -> Result<MutexGuard<'_, Vec<Question>>, StorageError> {
        self.questions
            .lock()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_topics(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.topics()?.iter().map(|t| t.name.clone()).collect())
    }

    async fn topic_exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.topics()?.iter().any(|t| t.name == name))
    }

    async fn insert_topic(&self, topic: &Topic) -> Result<(), StorageError> {
        self.topics()?.push(topic.clone());
        Ok(())
    }

    async fn list_questions(&self, topic: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .questions()?
            .iter()
            .filter(|q| q.topic == topic)
            .map(|q| q.question_text.clone())
            .collect())
    }

    async fn find_question(&self, question_text: &str) -> Result<Option<Question>, StorageError> {
        Ok(self
            .questions()?
            .iter()
            .find(|q| q.question_text == question_text)
            .cloned())
    }

    async fn find_question_in_topic(
        &self,
        topic: &str,
        question_text: &str,
    ) -> Result<Option<Question>, StorageError> {
        Ok(self
            .questions()?
            .iter()
            .find(|q| q.topic == topic && q.question_text == question_text)
            .cloned())
    }

    async fn question_exists(
        &self,
        topic: &str,
        question_text: &str,
    ) -> Result<bool, StorageError> {
        Ok(self
            .questions()?
            .iter()
            .any(|q| q.topic == topic && q.question_text == question_text))
    }

    async fn insert_question(&self, question: &Question) -> Result<(), StorageError> {
        self.questions()?.push(question.clone());
        Ok(())
    }
}
