pub mod csv_parser;
pub mod json_parser;
pub mod pdf_parser;
pub mod xlsx_parser;

use crate::domain::entities::holding::HoldingRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::holdings_parser::HoldingsParser;
use serde_json::{Number, Value};
use std::path::Path;

/// Typed value for a textual cell: integers and finite floats become JSON
/// numbers, blank cells null, anything else text.
pub(crate) fn cell_value(cell: &str) -> Value {
    let cell = cell.trim();
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::Number(i.into());
    }
    match cell.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(cell.to_string()),
    }
}

/// Zip a header row with each following row. Missing trailing cells are
/// null; blank header cells are named by column number.
pub(crate) fn rows_from_table(header: &[String], rows: Vec<Vec<Value>>) -> Vec<HoldingRecord> {
    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, h)| if h.trim().is_empty() { format!("Column_{}", i + 1) } else { h.trim().to_string() })
        .collect();
    rows.into_iter()
        .map(|cells| {
            let mut cells = cells.into_iter();
            names
                .iter()
                .map(|name| (name.clone(), cells.next().unwrap_or(Value::Null)))
                .collect()
        })
        .collect()
}

/// Routes an upload to the parser registered for its file extension.
pub struct HoldingsParsers {
    parsers: Vec<Box<dyn HoldingsParser>>,
}

impl HoldingsParsers {
    pub fn new(parsers: Vec<Box<dyn HoldingsParser>>) -> Self {
        Self { parsers }
    }

    pub fn parse_upload(&self, filename: &str, content: &[u8]) -> Result<Vec<HoldingRecord>, DomainError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let parser = self
            .parsers
            .iter()
            .find(|p| p.supports(&extension))
            .ok_or_else(|| {
                DomainError::InvalidInput(format!(
                    "Unsupported file type '{filename}'. Only CSV, JSON, PDF and XLSX supported for now."
                ))
            })?;

        let rows = parser.parse(content)?;
        if rows.is_empty() {
            return Err(DomainError::InvalidInput("No portfolio data found.".into()));
        }
        Ok(rows)
    }
}

impl Default for HoldingsParsers {
    fn default() -> Self {
        Self::new(vec![
            Box::new(csv_parser::CsvHoldingsParser),
            Box::new(json_parser::JsonHoldingsParser),
            Box::new(pdf_parser::PdfHoldingsParser),
            Box::new(xlsx_parser::XlsxHoldingsParser),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_extension() {
        let parsers = HoldingsParsers::default();
        let rows = parsers
            .parse_upload("Portfolio.CSV", b"Type,Invested_Amount,Current_Value\nStock,1,2\n")
            .unwrap();
        assert_eq!(rows.len(), 1);

        let rows = parsers
            .parse_upload(
                "p.json",
                br#"[{"Type":"Bond","Invested_Amount":5,"Current_Value":6}]"#,
            )
            .unwrap();
        assert_eq!(rows[0]["Type"], "Bond");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = HoldingsParsers::default()
            .parse_upload("statement.docx", b"PK")
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[test]
    fn test_columns_keep_upload_order() {
        let csv = "Name,Type,Invested_Amount,Current_Value,Broker\nACME,Stock,1000,1200,Fidelity\n";
        let rows = HoldingsParsers::default().parse_upload("p.csv", csv.as_bytes()).unwrap();
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["Name", "Type", "Invested_Amount", "Current_Value", "Broker"]);
    }

    #[test]
    fn test_rows_from_table_pads_and_names_columns() {
        let header = vec!["Type".to_string(), "".to_string()];
        let rows = rows_from_table(&header, vec![vec![Value::from("Stock")]]);
        assert_eq!(rows[0]["Type"], "Stock");
        assert_eq!(rows[0]["Column_2"], Value::Null);
    }

    #[test]
    fn test_empty_upload() {
        let err = HoldingsParsers::default()
            .parse_upload("p.csv", b"Type,Invested_Amount,Current_Value\n")
            .unwrap_err();
        assert!(err.to_string().contains("No portfolio data found"));
    }
}
