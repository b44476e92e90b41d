pub mod migrations;

use crate::models::{Question, Topic};
use crate::storage::{CatalogStore, StorageError};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

pub type DbConnection = Arc<Mutex<Connection>>;

const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Catalog store backed by SQLite.
///
/// Every query runs on the blocking thread pool so that callers can bound it
/// with a timeout.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    connection: DbConnection,
}

impl SqliteCatalogStore {
    /// Open the store from a connection string.
    ///
    /// Accepts a filesystem path, `sqlite://<path>`, `:memory:` or a SQLite
    /// `file:` URI. Parent directories of plain paths are created.
    pub fn open(database_url: &str) -> Result<Self, StorageError> {
        let target = database_url
            .strip_prefix("sqlite://")
            .unwrap_or(database_url)
            .trim();

        if target.is_empty() {
            return Err(StorageError::Connection(
                "Database connection string is empty".to_string(),
            ));
        }

        if target != ":memory:" && !target.starts_with("file:") {
            if let Some(parent) = Path::new(target).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        StorageError::Connection(format!(
                            "Failed to create database directory: {}",
                            e
                        ))
                    })?;
                }
            }
        }

        let conn = Connection::open(target)
            .map_err(|e| StorageError::Connection(format!("Failed to open {}: {}", target, e)))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, StorageError> {
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let existing = migrations::has_catalog_schema(&conn)?;
        migrations::run_catalog_migrations(&mut conn)
            .map_err(|e| StorageError::Migration(e.to_string()))?;
        if existing {
            debug!("Catalog schema is up to date");
        } else {
            info!("Created catalog schema");
        }

        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn connection(&self) -> DbConnection {
        self.connection.clone()
    }

    async fn run<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let connection = self.connection.clone();
        tokio::task::spawn_blocking(move || {
            let conn = connection
                .lock()
                .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))?;
            f(&conn).map_err(StorageError::from)
        })
        .await
        .map_err(|e| StorageError::OperationFailed(format!("Blocking task failed: {}", e)))?
    }
}

fn question_from_row(row: &Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        topic: row.get(0)?,
        question_text: row.get(1)?,
        approach: row.get(2)?,
        intuition: row.get(3)?,
    })
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn list_topics(&self) -> Result<Vec<String>, StorageError> {
        self.run(|conn| {
            let mut stmt = conn.prepare("SELECT name FROM topics ORDER BY id ASC")?;
            let names = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(names)
        })
        .await
    }

    async fn topic_exists(&self, name: &str) -> Result<bool, StorageError> {
        let name = name.to_string();
        self.run(move |conn| {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM topics WHERE name = ?1)",
                params![name],
                |row| row.get(0),
            )
        })
        .await
    }

    async fn insert_topic(&self, topic: &Topic) -> Result<(), StorageError> {
        let topic = topic.clone();
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO topics (name, created_at) VALUES (?1, ?2)",
                params![topic.name, chrono::Utc::now().timestamp()],
            )?;
            debug!(topic = %topic.name, id = conn.last_insert_rowid(), "Inserted topic");
            Ok(())
        })
        .await
    }

    async fn list_questions(&self, topic: &str) -> Result<Vec<String>, StorageError> {
        let topic = topic.to_string();
        self.run(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT question_text FROM questions WHERE topic = ?1 ORDER BY id ASC",
            )?;
            let texts = stmt
                .query_map(params![topic], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(texts)
        })
        .await
    }

    async fn find_question(&self, question_text: &str) -> Result<Option<Question>, StorageError> {
        let question_text = question_text.to_string();
        self.run(move |conn| {
            conn.query_row(
                r#"
                SELECT topic, question_text, approach, intuition
                FROM questions
                WHERE question_text = ?1
                ORDER BY id ASC
                LIMIT 1
                "#,
                params![question_text],
                question_from_row,
            )
            .optional()
        })
        .await
    }

    async fn find_question_in_topic(
        &self,
        topic: &str,
        question_text: &str,
    ) -> Result<Option<Question>, StorageError> {
        let topic = topic.to_string();
        let question_text = question_text.to_string();
        self.run(move |conn| {
            conn.query_row(
                r#"
                SELECT topic, question_text, approach, intuition
                FROM questions
                WHERE topic = ?1 AND question_text = ?2
                ORDER BY id ASC
                LIMIT 1
                "#,
                params![topic, question_text],
                question_from_row,
            )
            .optional()
        })
        .await
    }

    async fn question_exists(
        &self,
        topic: &str,
        question_text: &str,
    ) -> Result<bool, StorageError> {
        let topic = topic.to_string();
        let question_text = question_text.to_string();
        self.run(move |conn| {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM questions WHERE topic = ?1 AND question_text = ?2)",
                params![topic, question_text],
                |row| row.get(0),
            )
        })
        .await
    }

    async fn insert_question(&self, question: &Question) -> Result<(), StorageError> {
        let question = question.clone();
        self.run(move |conn| {
            conn.execute(
                r#"
                INSERT INTO questions
                    (topic, question_text, approach, intuition, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    question.topic,
                    question.question_text,
                    question.approach,
                    question.intuition,
                    chrono::Utc::now().timestamp(),
                ],
            )?;
            Ok(())
        })
        .await
    }
}
