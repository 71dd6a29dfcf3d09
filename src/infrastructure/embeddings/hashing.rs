use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};

/// Token used for texts with no words, so they still get a unit vector
/// that sits far from every real query instead of at the origin.
const EMPTY_TOKEN: &str = "\u{0}empty";

pub const DEFAULT_DIMENSION: usize = 384;

/// Local, dependency-free embedder using the signed hashing trick over
/// lowercase word tokens, L2-normalised. Deterministic across runs and
/// platforms; similarity reflects shared vocabulary only.
pub struct HashingProvider {
    dimension: usize,
}

impl HashingProvider {
    pub fn new(dimension: usize) -> Result<Self, DomainError> {
        if dimension == 0 {
            return Err(DomainError::Configuration(
                "hashing embedder dimension must be positive".into(),
            ));
        }
        Ok(Self { dimension })
    }

    pub fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0_f32; self.dimension];
        let lower = text.to_lowercase();
        let mut tokens = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .peekable();

        if tokens.peek().is_none() {
            self.add_token(&mut v, EMPTY_TOKEN);
        } else {
            for token in tokens {
                self.add_token(&mut v, token);
            }
        }

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        v
    }

    fn add_token(&self, v: &mut [f32], token: &str) {
        let h = seahash::hash(token.as_bytes());
        let bucket = (h % self.dimension as u64) as usize;
        let sign = if h >> 63 == 1 { -1.0 } else { 1.0 };
        v[bucket] += sign;
    }
}

impl Default for HashingProvider {
    fn default() -> Self {
        Self { dimension: DEFAULT_DIMENSION }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashingProvider {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
