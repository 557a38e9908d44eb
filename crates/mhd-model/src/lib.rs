//! Data model for published mental-health statistical tables.
//!
//! - **cell**: parsed worksheet cell values
//! - **sheet**: raw worksheet grids as read from a workbook
//! - **tidy**: long-format output tables
//! - **options**: cleaning options, per-table fixups, dataset configuration

pub mod cell;
pub mod error;
pub mod options;
pub mod sheet;
pub mod tidy;

pub use cell::{CellValue, format_numeric};
pub use error::{ConfigError, Result};
pub use options::{CleanOptions, DEFAULT_HEADER_ROW, DatasetConfig, Fixup, SummaryMatch};
pub use sheet::RawSheet;
pub use tidy::{COUNT_COLUMN, TidyRow, TidyTable, YEAR_COLUMN};
