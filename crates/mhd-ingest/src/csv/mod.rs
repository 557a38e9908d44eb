//! CSV sheet exports.

mod directory;
mod reader;

pub use directory::CsvDirectory;
pub use reader::{parse_cell, read_csv_sheet};
