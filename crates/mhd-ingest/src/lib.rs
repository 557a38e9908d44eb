//! Workbook ingestion for published statistical tables.
//!
//! This crate reads worksheets into [`mhd_model::RawSheet`] grids. It does
//! no cleaning; cells are typed the way the spreadsheet stores them.
//!
//! # Features
//!
//! - **Excel workbooks**: `.xlsx`, `.xls` and `.ods` through calamine
//! - **CSV directories**: one exported `.csv` per sheet
//! - **Sheet selection**: regular-expression matching on sheet names
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mhd_ingest::{open_workbook, select_sheets};
//!
//! let mut workbook = open_workbook(Path::new("data/admitted-patients-2012-22.xlsx"))?;
//! let sheets = select_sheets(&workbook.sheet_names(), r"Table AC\.\d+")?;
//! let raw = workbook.read_sheet(&sheets[0])?;
//! ```

mod csv;
mod discovery;
mod error;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use csv::{CsvDirectory, parse_cell, read_csv_sheet};
pub use workbook::{ExcelWorkbook, WorkbookSource, cell_from_data, open_workbook, sheet_from_range};

// === Discovery ===
pub use discovery::{list_csv_files, select_sheets, sheet_pattern};
