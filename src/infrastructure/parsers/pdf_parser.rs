use crate::domain::entities::holding::HoldingRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::holdings_parser::HoldingsParser;
use super::{cell_value, rows_from_table};

/// Holdings table inside a text PDF statement.
///
/// The first text line with two or more cells is the header. Later lines
/// with the same number of cells are data rows; lines repeating the header
/// (page breaks) and lines of any other shape are skipped.
pub struct PdfHoldingsParser;

/// Cells are separated by tabs or by runs of two or more spaces, so
/// single spaces inside a name survive.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    for chunk in line.split('\t') {
        let mut current = String::new();
        let mut spaces = 0;
        for c in chunk.chars() {
            if c == ' ' {
                spaces += 1;
                continue;
            }
            if spaces >= 2 && !current.is_empty() {
                cells.push(std::mem::take(&mut current));
            } else if spaces == 1 && !current.is_empty() {
                current.push(' ');
            }
            spaces = 0;
            current.push(c);
        }
        if !current.is_empty() {
            cells.push(current);
        }
    }
    cells
}

pub(crate) fn table_from_text(text: &str) -> Result<Vec<HoldingRecord>, DomainError> {
    let mut lines = text.lines().map(split_cells).filter(|cells| !cells.is_empty());

    let header = lines
        .by_ref()
        .find(|cells| cells.len() >= 2)
        .ok_or_else(|| DomainError::InvalidInput("No table found in PDF.".into()))?;

    let rows: Vec<_> = lines
        .filter(|cells| cells.len() == header.len() && *cells != header)
        .map(|cells| cells.iter().map(|c| cell_value(c)).collect())
        .collect();
    if rows.is_empty() {
        return Err(DomainError::InvalidInput("No table found in PDF.".into()));
    }
    Ok(rows_from_table(&header, rows))
}

impl HoldingsParser for PdfHoldingsParser {
    fn supports(&self, extension: &str) -> bool {
        extension == "pdf"
    }

    fn parse(&self, content: &[u8]) -> Result<Vec<HoldingRecord>, DomainError> {
        let text = pdf_extract::extract_text_from_mem(content)
            .map_err(|e| DomainError::Parse(format!("Unreadable PDF: {e}")))?;
        table_from_text(&text)
    }
}
