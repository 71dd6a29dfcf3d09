use crate::application::build_index::BuildIndexUseCase;
use crate::domain::entities::news_article::NewsArticle;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::search::{validate_search_params, RankedArticle};
use std::sync::Arc;
use tracing::debug;

/// Semantic news retrieval over an index built once at startup.
///
/// Every operation is read-only, so one engine can be shared across
/// concurrent requests without locking.
pub struct RetrievalEngine {
    articles: Arc<[NewsArticle]>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorStore>,
    default_threshold: f32,
}

impl RetrievalEngine {
    pub fn new(
        articles: Vec<NewsArticle>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorStore>,
        default_threshold: f32,
    ) -> Result<Self, DomainError> {
        if index.len() != articles.len() {
            return Err(DomainError::Configuration(format!(
                "index holds {} vectors but corpus has {} articles",
                index.len(),
                articles.len()
            )));
        }
        if !default_threshold.is_finite() {
            return Err(DomainError::Configuration(format!(
                "default threshold must be finite, got {default_threshold}"
            )));
        }
        Ok(Self {
            articles: articles.into(),
            embedder,
            index,
            default_threshold,
        })
    }

    /// Embed the corpus and build the index. Fails if the corpus is empty or
    /// any embedding call fails.
    pub async fn build(
        articles: Vec<NewsArticle>,
        embedder: Arc<dyn EmbeddingProvider>,
        default_threshold: f32,
    ) -> Result<Self, DomainError> {
        let index = BuildIndexUseCase::new(embedder.clone()).execute(&articles).await?;
        Self::new(articles, embedder, Arc::new(index), default_threshold)
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn default_threshold(&self) -> f32 {
        self.default_threshold
    }

    /// Up to `top_k` articles whose squared L2 distance to the query is
    /// strictly below `threshold`, nearest first. An empty result is not an
    /// error.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        threshold: f32,
    ) -> Result<Vec<RankedArticle>, DomainError> {
        validate_search_params(top_k, threshold)?;

        let vectors = self
            .embedder
            .embed(&[query.to_string()], InputType::Query)
            .await
            .map_err(|e| DomainError::Retrieval(format!("failed to embed query: {e}")))?;
        let Some(vector) = vectors.into_iter().next() else {
            return Err(DomainError::Retrieval(
                "embedding provider returned no vector for query".into(),
            ));
        };

        let neighbors = self.index.search_nearest(&vector, top_k)?;
        let results: Vec<RankedArticle> = neighbors
            .into_iter()
            .filter(|n| n.distance < threshold)
            .map(|n| RankedArticle {
                position: n.position,
                distance: n.distance,
                article: self.articles[n.position].clone(),
            })
            .collect();

        debug!(query, top_k, threshold, hits = results.len(), "news search");
        Ok(results)
    }

    pub async fn search_by_company(&self, name: &str, top_k: usize) -> Result<Vec<RankedArticle>, DomainError> {
        self.search(name, top_k, self.default_threshold).await
    }

    pub async fn search_by_topic(&self, topic: &str, top_k: usize) -> Result<Vec<RankedArticle>, DomainError> {
        self.search(topic, top_k, self.default_threshold).await
    }
}
