use crate::domain::entities::holding::HoldingRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::holdings_parser::HoldingsParser;
use serde_json::Value;

/// A JSON array of holding objects.
pub struct JsonHoldingsParser;

impl HoldingsParser for JsonHoldingsParser {
    fn supports(&self, extension: &str) -> bool {
        extension == "json"
    }

    fn parse(&self, content: &[u8]) -> Result<Vec<HoldingRecord>, DomainError> {
        let value: Value = serde_json::from_slice(content)
            .map_err(|e| DomainError::Parse(format!("Invalid JSON: {e}")))?;
        let Value::Array(items) = value else {
            return Err(DomainError::InvalidInput(
                "Expected a JSON array of holdings".into(),
            ));
        };
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(DomainError::InvalidInput(format!(
                    "Row {}: expected an object, got {other}",
                    i + 1
                ))),
            })
            .collect()
    }
}
