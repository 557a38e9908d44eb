//! Error types for workbook ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading workbooks and sheets.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Workbook file or directory does not exist.
    #[error("workbook not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Workbook Errors ===
    /// The spreadsheet library could not open or parse the workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// A sheet could not be read from an open workbook.
    #[error("failed to read sheet '{sheet}' from {path}: {message}")]
    Sheet {
        path: PathBuf,
        sheet: String,
        message: String,
    },

    /// The requested sheet is not in the workbook.
    #[error("sheet '{sheet}' not found in {path}")]
    UnknownSheet { path: PathBuf, sheet: String },

    // === CSV Errors ===
    /// Failed to parse a CSV sheet export.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // === Selection Errors ===
    /// The sheet name pattern is not a valid regular expression.
    #[error("invalid sheet pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
