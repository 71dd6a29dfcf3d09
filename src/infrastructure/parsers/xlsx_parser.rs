use crate::domain::entities::holding::HoldingRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::holdings_parser::HoldingsParser;
use super::{cell_value, rows_from_table};
use calamine::{Data, Reader, Xlsx};
use serde_json::{Number, Value};
use std::io::Cursor;

/// First worksheet of an Excel workbook, header in the first row.
pub struct XlsxHoldingsParser;

fn sheet_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Value::Number((*f as i64).into()),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => cell_value(s),
        other => Value::String(other.to_string()),
    }
}

impl HoldingsParser for XlsxHoldingsParser {
    fn supports(&self, extension: &str) -> bool {
        extension == "xlsx"
    }

    fn parse(&self, content: &[u8]) -> Result<Vec<HoldingRecord>, DomainError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(content))
            .map_err(|e| DomainError::Parse(format!("Unreadable XLSX: {e}")))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DomainError::InvalidInput("Workbook has no worksheets.".into()))?
            .map_err(|e| DomainError::Parse(format!("Unreadable worksheet: {e}")))?;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let header: Vec<String> = header.iter().map(|c| c.to_string()).collect();
        let data = rows
            .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
            .map(|row| row.iter().map(sheet_value).collect())
            .collect();
        Ok(rows_from_table(&header, data))
    }
}
