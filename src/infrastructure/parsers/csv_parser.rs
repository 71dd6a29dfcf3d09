use crate::domain::entities::holding::HoldingRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::holdings_parser::HoldingsParser;
use super::cell_value;
use csv::{ReaderBuilder, Trim};

/// CSV with a header row. Numeric-looking cells become JSON numbers, empty
/// cells become null, everything else stays text.
pub struct CsvHoldingsParser;

impl HoldingsParser for CsvHoldingsParser {
    fn supports(&self, extension: &str) -> bool {
        extension == "csv"
    }

    fn parse(&self, content: &[u8]) -> Result<Vec<HoldingRecord>, DomainError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|e| DomainError::Parse(format!("Failed to read CSV header: {e}")))?
            .clone();

        let mut rows = Vec::new();
        for (line_num, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                DomainError::Parse(format!("Line {}: Failed to parse CSV row: {e}", line_num + 2))
            })?;
            let row: HoldingRecord = headers
                .iter()
                .zip(record.iter())
                .map(|(name, cell)| (name.to_string(), cell_value(cell)))
                .collect();
            rows.push(row);
        }
        Ok(rows)
    }
}
