use crate::domain::error::DomainError;
use serde_json::{Map, Value};

pub const INVESTED_AMOUNT: &str = "Invested_Amount";
pub const CURRENT_VALUE: &str = "Current_Value";
pub const ASSET_TYPE: &str = "Type";

/// A raw portfolio row as produced by a holdings parser: field name → value.
pub type HoldingRecord = Map<String, Value>;

/// One portfolio row with its required fields extracted and typed.
///
/// `record` keeps every original field verbatim so it can be echoed back
/// in the detailed analysis output.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub invested_amount: f64,
    pub current_value: f64,
    pub asset_type: String,
    pub record: HoldingRecord,
}

impl Holding {
    /// Extract the required fields from a raw record. `row` is the
    /// zero-based position of the record and only used in error messages.
    pub fn from_record(row: usize, record: HoldingRecord) -> Result<Self, DomainError> {
        let invested_amount = number_field(row, &record, INVESTED_AMOUNT)?;
        let current_value = number_field(row, &record, CURRENT_VALUE)?;
        let asset_type = match record.get(ASSET_TYPE) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(_)) | Some(Value::Null) | None => {
                return Err(missing(row, ASSET_TYPE));
            }
            Some(other) => {
                return Err(DomainError::InvalidInput(format!(
                    "Row {}: field '{ASSET_TYPE}' must be text, got {other}",
                    row + 1
                )));
            }
        };

        Ok(Self {
            invested_amount,
            current_value,
            asset_type,
            record,
        })
    }

    pub fn from_records(records: Vec<HoldingRecord>) -> Result<Vec<Self>, DomainError> {
        records
            .into_iter()
            .enumerate()
            .map(|(row, record)| Self::from_record(row, record))
            .collect()
    }
}

fn missing(row: usize, field: &str) -> DomainError {
    DomainError::InvalidInput(format!(
        "Row {}: missing required field '{field}'",
        row + 1
    ))
}

fn number_field(row: usize, record: &HoldingRecord, field: &str) -> Result<f64, DomainError> {
    let value = match record.get(field) {
        None | Some(Value::Null) => return Err(missing(row, field)),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(missing(row, field)),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(DomainError::InvalidInput(format!(
            "Row {}: field '{field}' is not a number: {}",
            row + 1,
            record[field]
        ))),
    }
}
