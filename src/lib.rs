pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod server;

use crate::application::analytics::AnalyticsUseCase;
use crate::application::chat::{AskResponse, ChatUseCase, UploadResponse};
use crate::application::search::RetrievalEngine;
use crate::config::{Config, EmbeddingBackend};
use crate::domain::entities::holding::HoldingRecord;
use crate::domain::entities::news_article::NewsArticle;
use crate::domain::entities::session::Session;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::language_model::LanguageModel;
use crate::domain::ports::session_store::SessionStore;
use crate::domain::values::portfolio::PortfolioAnalysis;
use crate::domain::values::search::{NewsSearchResult, RankedArticle};
use crate::infrastructure::corpus::open_corpus;
use crate::infrastructure::embeddings::hashing::HashingProvider;
use crate::infrastructure::embeddings::ollama::OllamaEmbeddingProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::llm::ollama::OllamaClient;
use crate::infrastructure::parsers::HoldingsParsers;
use crate::infrastructure::sessions::memory::InMemorySessionStore;
use std::sync::Arc;
use tracing::info;

pub struct FolioRag {
    retrieval: Arc<RetrievalEngine>,
    analytics: Arc<AnalyticsUseCase>,
    chat: ChatUseCase,
}

impl FolioRag {
    /// Load the corpus and build the index as described by `config`.
    /// Returns only once the index is ready to serve.
    pub async fn from_config(config: &Config) -> Result<Self, DomainError> {
        let embedder: Arc<dyn EmbeddingProvider> = match config.embedding_backend {
            EmbeddingBackend::Hashing => Arc::new(HashingProvider::new(config.embedding_dimension)?),
            EmbeddingBackend::OpenAi => Arc::new(OpenAiProvider::new(
                config.embedding_api_key.clone(),
                config.embedding_model.clone(),
                None,
            )),
            EmbeddingBackend::Ollama => Arc::new(OllamaEmbeddingProvider::new(
                config.ollama_url.clone(),
                config.embedding_model.clone(),
            )),
        };
        let llm: Arc<dyn LanguageModel> = Arc::new(OllamaClient::new(
            config.ollama_url.clone(),
            config.llm_model.clone(),
        ));

        let corpus = open_corpus(&config.news_path)?;
        let articles = corpus.load().map_err(|e| match e {
            DomainError::Configuration(msg) => DomainError::Configuration(msg),
            other => DomainError::Configuration(format!(
                "cannot load news corpus from {}: {other}",
                config.news_path
            )),
        })?;
        info!(source = corpus.name(), path = %config.news_path, articles = articles.len(), "loaded news corpus");

        Self::with_providers(
            articles,
            embedder,
            llm,
            Arc::new(InMemorySessionStore::new()),
            config.default_threshold,
        )
        .await
    }

    pub async fn with_providers(
        articles: Vec<NewsArticle>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LanguageModel>,
        sessions: Arc<dyn SessionStore>,
        default_threshold: f32,
    ) -> Result<Self, DomainError> {
        let retrieval = Arc::new(RetrievalEngine::build(articles, embedder, default_threshold).await?);
        let analytics = Arc::new(AnalyticsUseCase::new(Arc::new(HoldingsParsers::default())));
        let chat = ChatUseCase::new(sessions, retrieval.clone(), analytics.clone(), llm);
        Ok(Self { retrieval, analytics, chat })
    }

    pub fn article_count(&self) -> usize {
        self.retrieval.article_count()
    }

    // Retrieval
    pub async fn search(&self, query: &str, top_k: usize, threshold: f32) -> Result<Vec<RankedArticle>, DomainError> {
        self.retrieval.search(query, top_k, threshold).await
    }

    pub async fn search_by_company(&self, name: &str, top_k: usize) -> Result<Vec<RankedArticle>, DomainError> {
        self.retrieval.search_by_company(name, top_k).await
    }

    pub async fn search_by_topic(&self, topic: &str, top_k: usize) -> Result<Vec<RankedArticle>, DomainError> {
        self.retrieval.search_by_topic(topic, top_k).await
    }

    pub async fn search_news(&self, query: &str, top_k: usize, threshold: f32) -> Result<NewsSearchResult, DomainError> {
        let ranked = self.search(query, top_k, threshold).await?;
        Ok(NewsSearchResult::new(query, &ranked))
    }

    pub async fn company_news(&self, name: &str, top_k: usize) -> Result<NewsSearchResult, DomainError> {
        let ranked = self.search_by_company(name, top_k).await?;
        Ok(NewsSearchResult::new(name, &ranked))
    }

    pub async fn topic_news(&self, topic: &str, top_k: usize) -> Result<NewsSearchResult, DomainError> {
        let ranked = self.search_by_topic(topic, top_k).await?;
        Ok(NewsSearchResult::new(topic, &ranked))
    }

    // Analytics
    pub fn analyze(&self, records: Vec<HoldingRecord>) -> Result<PortfolioAnalysis, DomainError> {
        self.analytics.analyze(records)
    }

    pub fn analyze_upload(&self, filename: &str, content: &[u8]) -> Result<PortfolioAnalysis, DomainError> {
        self.analytics.analyze_upload(filename, content).map(|(_, analysis)| analysis)
    }

    // Chat
    pub fn create_session(&self) -> Session {
        self.chat.create_session()
    }

    pub fn upload(&self, session_id: &str, filename: &str, content: &[u8]) -> Result<UploadResponse, DomainError> {
        self.chat.upload(session_id, filename, content)
    }

    pub async fn ask(&self, session_id: &str, question: &str) -> Result<AskResponse, DomainError> {
        self.chat.ask(session_id, question).await
    }

    pub async fn ask_portfolio(&self, filename: &str, content: &[u8], question: &str) -> Result<String, DomainError> {
        self.chat.ask_portfolio(filename, content, question).await
    }
}
