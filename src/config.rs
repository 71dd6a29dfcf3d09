use crate::domain::error::DomainError;
use crate::domain::values::search::DEFAULT_ENGINE_THRESHOLD;
use crate::infrastructure::embeddings::hashing::DEFAULT_DIMENSION;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    Hashing,
    OpenAi,
    Ollama,
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hashing" | "local" => Ok(EmbeddingBackend::Hashing),
            "openai" => Ok(EmbeddingBackend::OpenAi),
            "ollama" => Ok(EmbeddingBackend::Ollama),
            _ => Err(format!("Unknown embedding provider: {s}")),
        }
    }
}

/// Runtime settings, read from `FOLIO_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub news_path: String,
    pub embedding_backend: EmbeddingBackend,
    pub embedding_api_key: String,
    pub embedding_model: Option<String>,
    pub embedding_dimension: usize,
    pub ollama_url: String,
    pub llm_model: Option<String>,
    pub bind_addr: String,
    pub default_threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            news_path: "data/news_data.json".into(),
            embedding_backend: EmbeddingBackend::Hashing,
            embedding_api_key: String::new(),
            embedding_model: None,
            embedding_dimension: DEFAULT_DIMENSION,
            ollama_url: "http://localhost:11434".into(),
            llm_model: None,
            bind_addr: "0.0.0.0:8000".into(),
            default_threshold: DEFAULT_ENGINE_THRESHOLD,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let defaults = Self::default();

        let embedding_backend = match lookup("FOLIO_EMBEDDING_PROVIDER") {
            Some(v) => v.parse().map_err(DomainError::Configuration)?,
            None => defaults.embedding_backend,
        };
        let embedding_dimension = match lookup("FOLIO_EMBEDDING_DIM") {
            Some(v) => v.trim().parse().map_err(|e| {
                DomainError::Configuration(format!("FOLIO_EMBEDDING_DIM must be a positive integer: {e}"))
            })?,
            None => defaults.embedding_dimension,
        };
        let default_threshold: f32 = match lookup("FOLIO_DEFAULT_THRESHOLD") {
            Some(v) => v.trim().parse().map_err(|e| {
                DomainError::Configuration(format!("FOLIO_DEFAULT_THRESHOLD must be a number: {e}"))
            })?,
            None => defaults.default_threshold,
        };
        if !default_threshold.is_finite() {
            return Err(DomainError::Configuration(format!(
                "FOLIO_DEFAULT_THRESHOLD must be finite, got {default_threshold}"
            )));
        }

        Ok(Self {
            news_path: lookup("FOLIO_NEWS_PATH").unwrap_or(defaults.news_path),
            embedding_backend,
            embedding_api_key: lookup("FOLIO_EMBEDDING_API_KEY").unwrap_or_default(),
            embedding_model: lookup("FOLIO_EMBEDDING_MODEL"),
            embedding_dimension,
            ollama_url: lookup("FOLIO_OLLAMA_URL").unwrap_or(defaults.ollama_url),
            llm_model: lookup("FOLIO_LLM_MODEL"),
            bind_addr: lookup("FOLIO_BIND").unwrap_or(defaults.bind_addr),
            default_threshold,
        })
    }
}
