//! Reads one CSV export into a raw sheet.

use std::path::Path;

use csv::ReaderBuilder;
use mhd_model::{CellValue, RawSheet};

use crate::error::{IngestError, Result};

/// Parses a CSV field the way a spreadsheet would type it.
///
/// Empty fields are [`CellValue::Empty`]; fields that are exactly a finite
/// number are numeric; everything else, including whitespace-only text and
/// `"nan"`, stays text so missing-value tokens are preserved.
pub fn parse_cell(raw: &str) -> CellValue {
    if raw.is_empty() {
        return CellValue::Empty;
    }
    if raw.trim() == raw
        && let Ok(value) = raw.parse::<f64>()
        && value.is_finite()
    {
        return CellValue::Number(value);
    }
    CellValue::Text(raw.to_string())
}

/// Reads every record of `path`, header rows included, as a raw sheet.
///
/// Fields are not trimmed and records may have different lengths. Blank
/// worksheet rows must be exported as delimiter-only lines (`,,`); fully
/// empty lines are skipped by the parser and would shift row positions.
pub fn read_csv_sheet(path: &Path, name: &str) -> Result<RawSheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<CellValue> = record
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                if idx == 0 && rows.is_empty() {
                    parse_cell(field.trim_start_matches('\u{feff}'))
                } else {
                    parse_cell(field)
                }
            })
            .collect();
        rows.push(row);
    }
    Ok(RawSheet::new(name, rows))
}
