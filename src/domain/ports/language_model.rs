use crate::domain::error::DomainError;

/// Text generation backend. Output is passed through unvalidated.
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}
