use crate::models::{Approach, ImportRow};
use crate::storage::{CatalogStore, StorageError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Upper bound for a single store call unless configured otherwise
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Store unavailable during {operation}: {reason}")]
    StoreUnavailable {
        operation: &'static str,
        reason: String,
    },
}

/// What `upsert_row` did with a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOutcome {
    pub topic_created: bool,
    pub question: QuestionOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOutcome {
    Inserted,
    Duplicate,
}

/// Data-access layer over the catalog store.
///
/// Reads never fail: a store error or timeout is logged as `StoreUnavailable`
/// and the caller sees an empty list or `None`. The import write path reports
/// the error instead.
#[derive(Clone)]
pub struct CatalogClient {
    store: Arc<dyn CatalogStore>,
    timeout: Duration,
}

impl CatalogClient {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn guarded<T, F>(&self, operation: &'static str, call: F) -> Result<T, CatalogError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(CatalogError::StoreUnavailable {
                operation,
                reason: e.to_string(),
            }),
            Err(_) => Err(CatalogError::StoreUnavailable {
                operation,
                reason: format!("timed out after {}ms", self.timeout.as_millis()),
            }),
        }
    }

    /// All topic names; empty when the store is unavailable
    pub async fn list_topics(&self) -> Vec<String> {
        match self.guarded("list_topics", self.store.list_topics()).await {
            Ok(topics) => topics,
            Err(e) => {
                error!(error = %e, "Failed to list topics");
                Vec::new()
            }
        }
    }

    /// Question texts stored under exactly `topic_name`
    pub async fn list_questions(&self, topic_name: &str) -> Vec<String> {
        match self
            .guarded("list_questions", self.store.list_questions(topic_name))
            .await
        {
            Ok(questions) => questions,
            Err(e) => {
                error!(error = %e, topic = %topic_name, "Failed to list questions");
                Vec::new()
            }
        }
    }

    /// Approach for the first question with this exact text, in any topic
    pub async fn get_approach(&self, question_text: &str) -> Option<Approach> {
        match self
            .guarded("get_approach", self.store.find_question(question_text))
            .await
        {
            Ok(question) => question.map(|q| q.to_approach()),
            Err(e) => {
                error!(error = %e, question = %question_text, "Failed to look up approach");
                None
            }
        }
    }

    /// Approach for the question with this text inside `topic`
    pub async fn get_approach_in_topic(
        &self,
        topic: &str,
        question_text: &str,
    ) -> Option<Approach> {
        match self
            .guarded(
                "get_approach_in_topic",
                self.store.find_question_in_topic(topic, question_text),
            )
            .await
        {
            Ok(question) => question.map(|q| q.to_approach()),
            Err(e) => {
                error!(
                    error = %e,
                    topic = %topic,
                    question = %question_text,
                    "Failed to look up approach"
                );
                None
            }
        }
    }

    /// Insert the row's topic if absent, then its question if the
    /// `(topic, question)` pair is absent. Existing questions are never
    /// updated.
    pub async fn upsert_row(&self, row: &ImportRow) -> Result<RowOutcome, CatalogError> {
        let topic_exists = self
            .guarded("topic_exists", self.store.topic_exists(&row.topic))
            .await?;

        if !topic_exists {
            self.guarded("insert_topic", self.store.insert_topic(&row.topic()))
                .await?;
            info!(topic = %row.topic, "Inserted topic");
        }

        let question_exists = self
            .guarded(
                "question_exists",
                self.store.question_exists(&row.topic, &row.question),
            )
            .await?;

        let question = if question_exists {
            info!(
                topic = %row.topic,
                question = %row.question,
                "Question already exists, skipping duplicate"
            );
            QuestionOutcome::Duplicate
        } else {
            self.guarded("insert_question", self.store.insert_question(&row.to_question()))
                .await?;
            info!(topic = %row.topic, question = %row.question, "Inserted question");
            QuestionOutcome::Inserted
        };

        Ok(RowOutcome {
            topic_created: !topic_exists,
            question,
        })
    }
}
