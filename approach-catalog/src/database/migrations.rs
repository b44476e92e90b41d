use refinery::embed_migrations;

// Embed migrations from the migrations directory
embed_migrations!("src/database/migrations");

/// Run catalog migrations on a database connection
///
/// Creates the `topics` and `questions` tables and the indexes used by the
/// equality lookups on `name`, `topic` and `question_text`.
pub fn run_catalog_migrations<C>(conn: &mut C) -> Result<(), refinery::Error>
where
    C: refinery::Migrate,
{
    migrations::runner().run(conn).map(|_| ())
}

/// Check if catalog tables exist in database
pub fn has_catalog_schema(conn: &rusqlite::Connection) -> rusqlite::Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='questions'")?;
    stmt.exists([])
}
