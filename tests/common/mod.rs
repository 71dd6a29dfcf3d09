//! Shared test helpers.
#![allow(dead_code)]

use folio_rag::domain::entities::news_article::NewsArticle;
use folio_rag::domain::error::DomainError;
use folio_rag::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use folio_rag::domain::ports::language_model::LanguageModel;
use folio_rag::infrastructure::embeddings::hashing::HashingProvider;
use folio_rag::infrastructure::sessions::memory::InMemorySessionStore;
use folio_rag::FolioRag;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Engine default threshold used by `setup`.
pub const DEFAULT_THRESHOLD: f32 = 1.5;

pub fn sample_corpus() -> Vec<NewsArticle> {
    vec![
        NewsArticle::new(
            "Apple earnings beat expectations",
            "https://news.example/apple-earnings",
            "Apple reported record iPhone revenue for the quarter",
        ),
        NewsArticle::new(
            "Tesla deliveries slow",
            "https://news.example/tesla-deliveries",
            "Tesla vehicle deliveries fell short of analyst estimates",
        ),
        NewsArticle::new(
            "Federal Reserve holds interest rates",
            "https://news.example/fed-rates",
            "The Fed kept rates unchanged and signalled patience on cuts",
        ),
        NewsArticle::new(
            "Oil prices slump on supply glut",
            "https://news.example/oil",
            "Crude futures dropped as inventories climbed",
        ),
        NewsArticle::new(
            "Utilities raise dividend payouts",
            "https://news.example/dividends",
            "Several utility companies announced dividend increases",
        ),
        NewsArticle::new("", "https://news.example/blank", ""),
    ]
}

/// Answers with a counter and remembers every prompt it was given.
#[derive(Default)]
pub struct RecordingModel {
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl LanguageModel for RecordingModel {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        Ok(format!("answer #{}", prompts.len()))
    }
}

pub struct FailingModel;

#[async_trait::async_trait]
impl LanguageModel for FailingModel {
    async fn generate(&self, _prompt: &str) -> Result<String, DomainError> {
        Err(DomainError::Llm("model offline".into()))
    }
}

/// Looks vectors up by exact text; unknown texts map to `fallback`.
pub struct FixedEmbedder {
    pub vectors: HashMap<String, Vec<f32>>,
    pub fallback: Vec<f32>,
}

impl FixedEmbedder {
    pub fn new(pairs: &[(&str, Vec<f32>)], fallback: Vec<f32>) -> Self {
        Self {
            vectors: pairs.iter().map(|(t, v)| (t.to_string(), v.clone())).collect(),
            fallback,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for FixedEmbedder {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts
            .iter()
            .map(|t| self.vectors.get(t).cloned().unwrap_or_else(|| self.fallback.clone()))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.fallback.len()
    }
}

/// Embeds documents fine but fails every query.
pub struct QueryFailingEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for QueryFailingEmbedder {
    async fn embed(&self, texts: &[String], input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        match input_type {
            InputType::Document => Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect()),
            InputType::Query => Err(DomainError::Embedding("provider unavailable".into())),
        }
    }

    fn dimension(&self) -> usize {
        2
    }
}

pub async fn setup_with_model(llm: Arc<dyn LanguageModel>) -> FolioRag {
    FolioRag::with_providers(
        sample_corpus(),
        Arc::new(HashingProvider::default()),
        llm,
        Arc::new(InMemorySessionStore::new()),
        DEFAULT_THRESHOLD,
    )
    .await
    .unwrap()
}

pub async fn setup() -> FolioRag {
    setup_with_model(Arc::new(RecordingModel::default())).await
}

pub const PORTFOLIO_CSV: &str = "Name,Type,Invested_Amount,Current_Value\n\
ACME,Stock,1000,1200\n\
T-Bill,Bond,500,450\n";
