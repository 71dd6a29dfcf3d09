use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Embeddings from a local Ollama server (`/api/embed`).
pub struct OllamaEmbeddingProvider {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbeddingProvider {
    pub fn new(base_url: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.unwrap_or_else(|| "all-minilm".to_string()),
        }
    }

    fn model_dimension(model: &str) -> usize {
        match model.split(':').next().unwrap_or(model) {
            "all-minilm" => 384,
            "nomic-embed-text" => 768,
            "mxbai-embed-large" => 1024,
            _ => 0,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        let url = format!("{}/api/embed", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&EmbedRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("Ollama API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!("Ollama API {status}: {body}")));
        }

        let result: EmbedResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Parse error: {e}")))?;
        Ok(result.embeddings)
    }

    fn dimension(&self) -> usize {
        Self::model_dimension(&self.model)
    }
}
