use crate::domain::entities::news_article::NewsArticle;
use crate::domain::error::DomainError;
use crate::domain::ports::corpus_source::CorpusSource;
use std::path::PathBuf;

/// News corpus read from a JSON array of `{title, link, summary, content?}`.
pub struct JsonFileCorpus {
    path: PathBuf,
}

impl JsonFileCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for JsonFileCorpus {
    fn name(&self) -> &str {
        "json"
    }

    fn load(&self) -> Result<Vec<NewsArticle>, DomainError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            DomainError::Configuration(format!(
                "cannot read news corpus {}: {e}",
                self.path.display()
            ))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            DomainError::Configuration(format!(
                "malformed news corpus {}: {e}",
                self.path.display()
            ))
        })
    }
}
