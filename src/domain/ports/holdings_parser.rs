use crate::domain::entities::holding::HoldingRecord;
use crate::domain::error::DomainError;

/// Turns an uploaded file into raw portfolio rows.
pub trait HoldingsParser: Send + Sync {
    /// Whether this parser handles files with the given (lowercase) extension.
    fn supports(&self, extension: &str) -> bool;
    fn parse(&self, content: &[u8]) -> Result<Vec<HoldingRecord>, DomainError>;
}
