use crate::domain::entities::news_article::{ArticleSummary, NewsArticle};
use crate::domain::error::DomainError;
use serde::Serialize;

/// Result count used when the caller does not ask for one.
pub const DEFAULT_TOP_K: usize = 5;

/// Threshold for free-text query endpoints.
pub const DEFAULT_QUERY_THRESHOLD: f32 = 2.0;

/// Threshold the engine applies to company, topic and chat-context lookups.
pub const DEFAULT_ENGINE_THRESHOLD: f32 = 1.0;

/// An article paired with its squared L2 distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedArticle {
    /// Position of the article in the corpus.
    pub position: usize,
    pub distance: f32,
    pub article: NewsArticle,
}

/// Caller-facing search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsSearchResult {
    pub query: String,
    pub result_count: usize,
    pub news_articles: Vec<ArticleSummary>,
}

impl NewsSearchResult {
    pub fn new(query: impl Into<String>, ranked: &[RankedArticle]) -> Self {
        Self {
            query: query.into(),
            result_count: ranked.len(),
            news_articles: ranked.iter().map(|r| r.article.to_summary()).collect(),
        }
    }
}

pub fn validate_search_params(top_k: usize, threshold: f32) -> Result<(), DomainError> {
    if top_k == 0 {
        return Err(DomainError::InvalidInput("top_k must be at least 1".into()));
    }
    if !threshold.is_finite() {
        return Err(DomainError::InvalidInput(format!(
            "threshold must be a finite number, got {threshold}"
        )));
    }
    Ok(())
}
