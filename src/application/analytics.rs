use crate::domain::entities::holding::HoldingRecord;
use crate::domain::error::DomainError;
use crate::domain::values::portfolio::PortfolioAnalysis;
use crate::infrastructure::parsers::HoldingsParsers;
use std::sync::Arc;

pub struct AnalyticsUseCase {
    parsers: Arc<HoldingsParsers>,
}

impl AnalyticsUseCase {
    pub fn new(parsers: Arc<HoldingsParsers>) -> Self {
        Self { parsers }
    }

    pub fn analyze(&self, records: Vec<HoldingRecord>) -> Result<PortfolioAnalysis, DomainError> {
        PortfolioAnalysis::from_records(records)
    }

    /// Parse an uploaded file and analyze it. Returns the parsed rows too so
    /// callers can keep them.
    pub fn analyze_upload(
        &self,
        filename: &str,
        content: &[u8],
    ) -> Result<(Vec<HoldingRecord>, PortfolioAnalysis), DomainError> {
        let records = self.parsers.parse_upload(filename, content)?;
        let analysis = PortfolioAnalysis::from_records(records.clone())?;
        Ok((records, analysis))
    }
}
