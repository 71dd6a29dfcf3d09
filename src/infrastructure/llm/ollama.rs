use crate::domain::error::DomainError;
use crate::domain::ports::language_model::LanguageModel;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Non-streaming completions from a local Ollama server (`/api/generate`).
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaClient {
    pub fn new(base_url: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.unwrap_or_else(|| "phi3:mini".to_string()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LanguageModel for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let url = format!("{}/api/generate", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| DomainError::Llm(format!("Ollama API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Llm(format!("Ollama API {status}: {body}")));
        }

        let result: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Llm(format!("unreadable Ollama response: {e}")))?;
        Ok(result.response)
    }
}
