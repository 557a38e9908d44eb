//! Error types for table cleaning and fixups.

use thiserror::Error;

/// Errors raised by [`crate::clean`].
#[derive(Debug, Error)]
pub enum CleanError {
    /// The header row is missing or yields unusable column names.
    #[error("schema error in sheet '{sheet}': {reason}")]
    Schema { sheet: String, reason: String },

    /// A year column header did not parse as an integer.
    #[error("year column '{header}' in sheet '{sheet}' is not an integer")]
    YearParse { sheet: String, header: String },
}

impl CleanError {
    pub(crate) fn schema(sheet: &str, reason: impl Into<String>) -> Self {
        Self::Schema {
            sheet: sheet.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while applying per-table fixups.
#[derive(Debug, Error)]
pub enum FixupError {
    #[error("fixup '{fixup}' on '{table}' references unknown column '{column}'")]
    UnknownColumn {
        table: String,
        fixup: &'static str,
        column: String,
    },

    #[error("fixup '{fixup}' on '{table}' would duplicate column '{column}'")]
    DuplicateColumn {
        table: String,
        fixup: &'static str,
        column: String,
    },
}

/// Errors raised by aggregation helpers.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("unknown column '{column}' (available: {})", available.join(", "))]
    UnknownColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("invalid filter '{0}', expected COLUMN=VALUE[,VALUE...]")]
    InvalidFilter(String),
}

pub type Result<T> = std::result::Result<T, CleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CleanError::schema("Table AC.1", "header row 4 is past the end of the sheet");
        assert_eq!(
            err.to_string(),
            "schema error in sheet 'Table AC.1': header row 4 is past the end of the sheet"
        );
        let err = CleanError::YearParse {
            sheet: "Table AC.2".to_string(),
            header: "99999999999".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "year column '99999999999' in sheet 'Table AC.2' is not an integer"
        );
    }
}
