//! One-shot ingestion of `{Topic, Question, Approach, Intuition}` rows.
//!
//! Rows are processed strictly in source order: a later row may rely on a
//! topic inserted by an earlier one. Re-running an import over the same or an
//! appended file only adds the missing pairs. Existing questions are never
//! updated.
//!
//! Malformed rows (a missing or blank cell) and rows whose store writes fail
//! are skipped and listed in the final [`ImportReport`]; the run continues.


use crate::client::{CatalogClient, QuestionOutcome};
use crate::models::{ImportRow, RawImportRow};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Header columns every import file must provide
pub const REQUIRED_COLUMNS: [&str; 4] = ["Topic", "Question", "Approach", "Intuition"];

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to open {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Import file is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// A row that was not imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    /// Source line for files (header is line 1), 1-based position for row lists
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub rows_read: usize,
    pub topics_inserted: usize,
    pub questions_inserted: usize,
    pub duplicates_skipped: usize,
    pub malformed: Vec<RowIssue>,
    pub failed: Vec<RowIssue>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.failed.is_empty()
    }
}

struct SourceRow {
    line: u64,
    row: Result<ImportRow, String>,
}

pub struct ImportLoader {
    catalog: CatalogClient,
}

impl ImportLoader {
    pub fn new(catalog: CatalogClient) -> Self {
        Self { catalog }
    }

    /// Import a CSV file with a `Topic,Question,Approach,Intuition` header
    pub async fn import_csv(&self, path: &Path) -> Result<ImportReport, ImportError> {
        info!(path = %path.display(), "Importing catalog rows");
        let file = File::open(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.import_reader(file).await
    }

    /// Import CSV content from any reader
    pub async fn import_reader<R: Read>(&self, reader: R) -> Result<ImportReport, ImportError> {
        let rows = read_csv_rows(reader)?;
        Ok(self.process(rows).await)
    }

    /// Import rows already in memory
    pub async fn import_rows<I>(&self, rows: I) -> ImportReport
    where
        I: IntoIterator<Item = ImportRow>,
    {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| SourceRow {
                line: index as u64 + 1,
                row: Ok(row),
            })
            .collect();
        self.process(rows).await
    }

    async fn process(&self, rows: Vec<SourceRow>) -> ImportReport {
        let mut report = ImportReport::default();

        for source in rows {
            report.rows_read += 1;

            let row = match source.row.and_then(ImportRow::validate) {
                Ok(row) => row,
                Err(reason) => {
                    warn!(line = source.line, reason = %reason, "Skipping malformed row");
                    report.malformed.push(RowIssue {
                        line: source.line,
                        reason,
                    });
                    continue;
                }
            };

            match self.catalog.upsert_row(&row).await {
                Ok(outcome) => {
                    if outcome.topic_created {
                        report.topics_inserted += 1;
                    }
                    match outcome.question {
                        QuestionOutcome::Inserted => report.questions_inserted += 1,
                        QuestionOutcome::Duplicate => report.duplicates_skipped += 1,
                    }
                }
                Err(e) => {
                    error!(line = source.line, error = %e, "Failed to import row");
                    report.failed.push(RowIssue {
                        line: source.line,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            rows_read = report.rows_read,
            topics_inserted = report.topics_inserted,
            questions_inserted = report.questions_inserted,
            duplicates_skipped = report.duplicates_skipped,
            malformed = report.malformed.len(),
            failed = report.failed.len(),
            "Import finished"
        );

        report
    }
}

fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<SourceRow>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        // Data rows start on line 2
        let fallback_line = index as u64 + 2;
        let source = match record {
            Ok(record) => {
                let line = record
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(fallback_line);
                let row = record
                    .deserialize::<RawImportRow>(Some(&headers))
                    .map_err(|e| e.to_string())
                    .and_then(RawImportRow::into_row);
                SourceRow { line, row }
            }
            Err(e) => SourceRow {
                line: e.position().map(|p| p.line()).unwrap_or(fallback_line),
                row: Err(e.to_string()),
            },
        };
        rows.push(source);
    }

    Ok(rows)
}
