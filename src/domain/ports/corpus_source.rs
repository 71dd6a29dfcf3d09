use crate::domain::entities::news_article::NewsArticle;
use crate::domain::error::DomainError;

/// Supplies the news corpus, in a stable order, at startup.
pub trait CorpusSource: Send + Sync {
    fn name(&self) -> &str;
    fn load(&self) -> Result<Vec<NewsArticle>, DomainError>;
}
