use crate::domain::entities::news_article::NewsArticle;
use crate::domain::error::DomainError;
use crate::domain::ports::corpus_source::CorpusSource;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::{params, Connection};
use std::sync::Mutex;

/// News corpus stored in an `articles` table, loaded in insertion order.
pub struct SqliteNewsCorpus {
    conn: Mutex<Connection>,
}

impl SqliteNewsCorpus {
    pub fn new(conn: Connection) -> Result<Self, DomainError> {
        run_migrations(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn open(path: &str) -> Result<Self, DomainError> {
        let conn = Connection::open(path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        Self::new(conn)
    }

    pub fn add(&self, article: &NewsArticle) -> Result<(), DomainError> {
        let conn = self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO articles (title, link, summary, content) VALUES (?1, ?2, ?3, ?4)",
            params![article.title, article.link, article.summary, article.content],
        )?;
        Ok(())
    }
}

impl CorpusSource for SqliteNewsCorpus {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn load(&self) -> Result<Vec<NewsArticle>, DomainError> {
        let conn = self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn.prepare("SELECT title, link, summary, content FROM articles ORDER BY id")?;
        let articles = stmt
            .query_map([], |row| {
                Ok(NewsArticle {
                    title: row.get(0)?,
                    link: row.get(1)?,
                    summary: row.get(2)?,
                    content: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(articles)
    }
}
