use crate::domain::entities::news_article::NewsArticle;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::vector_store::VectorStore;
use crate::infrastructure::index::flat_l2::FlatL2Index;
use std::sync::Arc;
use tracing::{info, warn};

const BATCH_SIZE: usize = 32;

/// One-shot startup phase: embed every article and freeze the vectors into
/// an index. Any failure here is fatal; the caller must not serve queries.
pub struct BuildIndexUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl BuildIndexUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }

    pub async fn execute(&self, articles: &[NewsArticle]) -> Result<FlatL2Index, DomainError> {
        if articles.is_empty() {
            return Err(DomainError::Configuration("news corpus is empty".into()));
        }

        let mut vectors = Vec::with_capacity(articles.len());
        for (batch_num, chunk) in articles.chunks(BATCH_SIZE).enumerate() {
            let texts: Vec<String> = chunk.iter().map(NewsArticle::searchable_text).collect();
            for (offset, text) in texts.iter().enumerate() {
                if text.is_empty() {
                    warn!(position = batch_num * BATCH_SIZE + offset, "article has no text to embed, indexing empty string");
                }
            }

            let batch = self
                .embedder
                .embed(&texts, InputType::Document)
                .await
                .map_err(|e| DomainError::Configuration(format!("failed to embed news corpus: {e}")))?;
            if batch.len() != chunk.len() {
                return Err(DomainError::Configuration(format!(
                    "embedding provider returned {} vectors for {} articles",
                    batch.len(),
                    chunk.len()
                )));
            }
            vectors.extend(batch);
        }

        let index = FlatL2Index::build(vectors)?;

        let advertised = self.embedder.dimension();
        if advertised > 0 && advertised != index.dimension() {
            return Err(DomainError::Configuration(format!(
                "embedding provider reports dimension {advertised} but produced vectors of dimension {}",
                index.dimension()
            )));
        }

        info!(articles = articles.len(), "built news vector index");
        Ok(index)
    }
}
