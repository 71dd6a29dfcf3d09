pub mod json_file;

use crate::domain::error::DomainError;
use crate::domain::ports::corpus_source::CorpusSource;
use crate::infrastructure::sqlite::news_corpus::SqliteNewsCorpus;
use json_file::JsonFileCorpus;

/// Pick a corpus source from the file extension: `.db`/`.sqlite` are
/// opened as SQLite, anything else is read as JSON.
pub fn open_corpus(path: &str) -> Result<Box<dyn CorpusSource>, DomainError> {
    let lower = path.to_lowercase();
    if lower.ends_with(".db") || lower.ends_with(".sqlite") || lower.ends_with(".sqlite3") {
        Ok(Box::new(SqliteNewsCorpus::open(path)?))
    } else {
        Ok(Box::new(JsonFileCorpus::new(path)))
    }
}
