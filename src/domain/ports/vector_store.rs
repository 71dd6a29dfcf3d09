use crate::domain::error::DomainError;

/// A nearest-neighbour hit: corpus position and squared L2 distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f32,
}

/// Read-only vector index. Built once, then searched concurrently.
pub trait VectorStore: Send + Sync {
    /// Up to `limit` neighbours ordered by increasing distance; equal
    /// distances keep insertion order.
    fn search_nearest(&self, vector: &[f32], limit: usize) -> Result<Vec<Neighbor>, DomainError>;
    fn dimension(&self) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
