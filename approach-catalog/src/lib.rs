pub mod client;
pub mod database;
pub mod import;
pub mod menu;
pub mod models;
pub mod storage;

pub use client::{CatalogClient, CatalogError, QuestionOutcome, RowOutcome, DEFAULT_STORE_TIMEOUT};
pub use database::SqliteCatalogStore;
pub use import::{ImportError, ImportLoader, ImportReport, RowIssue};
pub use menu::MenuResolver;
pub use models::{Approach, ImportRow, Question, RawImportRow, Topic};
pub use storage::{CatalogStore, InMemoryCatalogStore, StorageError};
