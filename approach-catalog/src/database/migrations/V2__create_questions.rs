/// Create the questions collection
///
/// `(topic, question_text)` carries no UNIQUE constraint; the import loader
/// checks for an existing pair before inserting.
pub fn migration() -> String {
    r#"
CREATE TABLE questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic TEXT NOT NULL,
    question_text TEXT NOT NULL,
    approach TEXT NOT NULL,
    intuition TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX idx_questions_topic
    ON questions(topic);

CREATE INDEX idx_questions_question_text
    ON questions(question_text);
"#
    .to_string()
}
