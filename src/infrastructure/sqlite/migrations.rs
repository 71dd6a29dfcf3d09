use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS articles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            link TEXT NOT NULL,
            summary TEXT NOT NULL DEFAULT '',
            content TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_articles_link ON articles(link);
        "
    ).map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
