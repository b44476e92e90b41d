/// Create the topics collection
pub fn migration() -> String {
    r#"
CREATE TABLE topics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX idx_topics_name
    ON topics(name);
"#
    .to_string()
}
