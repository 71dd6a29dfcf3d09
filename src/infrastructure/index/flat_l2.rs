use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{Neighbor, VectorStore};
use crate::domain::values::distance::squared_l2;

/// Exact in-memory index: vectors stored contiguously, searched by brute
/// force. Immutable after `build`, so searches need no locking.
#[derive(Debug)]
pub struct FlatL2Index {
    dimension: usize,
    data: Vec<f32>,
}

impl FlatL2Index {
    /// Build from vectors given in corpus order. All vectors must share one
    /// non-zero dimension.
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self, DomainError> {
        let dimension = match vectors.first() {
            Some(v) => v.len(),
            None => {
                return Err(DomainError::Configuration(
                    "cannot build an index from zero vectors".into(),
                ))
            }
        };
        if dimension == 0 {
            return Err(DomainError::Configuration(
                "embedding provider returned zero-length vectors".into(),
            ));
        }

        let mut data = Vec::with_capacity(dimension * vectors.len());
        for (position, v) in vectors.iter().enumerate() {
            if v.len() != dimension {
                return Err(DomainError::Configuration(format!(
                    "vector {position} has dimension {} but index dimension is {dimension}",
                    v.len()
                )));
            }
            data.extend_from_slice(v);
        }

        Ok(Self { dimension, data })
    }

    fn vectors(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.dimension)
    }
}

impl VectorStore for FlatL2Index {
    fn search_nearest(&self, vector: &[f32], limit: usize) -> Result<Vec<Neighbor>, DomainError> {
        if vector.len() != self.dimension {
            return Err(DomainError::Configuration(format!(
                "query vector has dimension {} but index dimension is {}",
                vector.len(),
                self.dimension
            )));
        }

        let mut results: Vec<Neighbor> = self
            .vectors()
            .enumerate()
            .map(|(position, stored)| Neighbor {
                position,
                distance: squared_l2(vector, stored),
            })
            .collect();

        // Stable sort: equal distances stay in corpus order
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results.truncate(limit);
        Ok(results)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.data.len() / self.dimension
    }
}
