//! Workbook sources and the Excel reader.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use mhd_model::{CellValue, RawSheet};
use tracing::debug;

use crate::csv::CsvDirectory;
use crate::error::{IngestError, Result};

/// Something that can list its sheets and hand out raw cell grids.
pub trait WorkbookSource {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Reads one sheet as a grid of parsed cells.
    fn read_sheet(&mut self, name: &str) -> Result<RawSheet>;

    /// Where the workbook was loaded from, for messages.
    fn location(&self) -> &Path;
}

/// An `.xlsx`/`.xls`/`.ods` workbook read with calamine.
pub struct ExcelWorkbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl ExcelWorkbook {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(IngestError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let sheets = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }
}

impl WorkbookSource for ExcelWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawSheet> {
        if !self.sheets.sheet_names().iter().any(|sheet| sheet == name) {
            return Err(IngestError::UnknownSheet {
                path: self.path.clone(),
                sheet: name.to_string(),
            });
        }
        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|e| IngestError::Sheet {
                path: self.path.clone(),
                sheet: name.to_string(),
                message: e.to_string(),
            })?;
        let sheet = sheet_from_range(name, &range);
        debug!(sheet = name, rows = sheet.height(), "read excel sheet");
        Ok(sheet)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Maps a calamine cell to a [`CellValue`].
pub fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Float(value) => CellValue::Number(*value),
        Data::String(value) => CellValue::text(value.as_str()),
        Data::Bool(value) => CellValue::Text(if *value { "True" } else { "False" }.to_string()),
        other => CellValue::text(other.to_string()),
    }
}

/// Builds a sheet whose row and column indices are worksheet positions.
///
/// Calamine ranges start at the first used cell, so leading empty rows and
/// columns are padded back in.
pub fn sheet_from_range(name: &str, range: &Range<Data>) -> RawSheet {
    let (start_row, start_col) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row];
    for cells in range.rows() {
        let mut row = vec![CellValue::Empty; start_col];
        row.extend(cells.iter().map(cell_from_data));
        rows.push(row);
    }
    RawSheet::new(name, rows)
}

/// Opens a directory of CSV exports or a spreadsheet file.
pub fn open_workbook(path: &Path) -> Result<Box<dyn WorkbookSource>> {
    if path.is_dir() {
        Ok(Box::new(CsvDirectory::open(path)?))
    } else {
        Ok(Box::new(ExcelWorkbook::open(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_cells_map_to_values() {
        assert_eq!(cell_from_data(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_from_data(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(cell_from_data(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(
            cell_from_data(&Data::String("n.p.".to_string())),
            CellValue::from("n.p.")
        );
        assert_eq!(cell_from_data(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(cell_from_data(&Data::Bool(true)), CellValue::from("True"));
    }

    #[test]
    fn range_is_placed_at_worksheet_position() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("State".to_string()));
        range.set_value((2, 2), Data::String("2012\u{2013}13".to_string()));
        range.set_value((3, 1), Data::String("NSW".to_string()));
        range.set_value((3, 2), Data::Float(4.0));

        let sheet = sheet_from_range("Table AC.1", &range);
        assert_eq!(sheet.height(), 4);
        assert!(sheet.rows[0..2].iter().all(Vec::is_empty));
        assert_eq!(sheet.cell(2, 0), &CellValue::Empty);
        assert_eq!(sheet.cell(2, 1), &CellValue::from("State"));
        assert_eq!(sheet.cell(3, 2), &CellValue::Number(4.0));
        assert_eq!(sheet.width(), 3);
    }

    #[test]
    fn empty_range_is_empty_sheet() {
        let range: Range<Data> = Range::empty();
        let sheet = sheet_from_range("Contents", &range);
        assert_eq!(sheet.height(), 0);
    }

    #[test]
    fn missing_workbook_is_not_found() {
        let result = ExcelWorkbook::open(Path::new("does/not/exist.xlsx"));
        assert!(matches!(result, Err(IngestError::NotFound { .. })));
    }
}
