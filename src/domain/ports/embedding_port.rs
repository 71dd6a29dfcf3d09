use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Document,
    Query,
}

/// Maps text to fixed-dimension vectors. Implementations must be
/// deterministic: the same text always yields the same vector.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, one vector per input, in input order.
    async fn embed(&self, texts: &[String], input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Advertised output size, or 0 when only known after the first call.
    fn dimension(&self) -> usize;
}
