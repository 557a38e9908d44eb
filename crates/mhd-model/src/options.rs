//! Configuration for cleaning and loading worksheets.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default zero-based index of the header row in published tables.
pub const DEFAULT_HEADER_ROW: usize = 4;

/// How summary rows (`Total`, `Subtotal`, `All`) are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMatch {
    /// A cell must equal one of the summary tokens exactly.
    #[default]
    Exact,
    /// A cell containing `Total` or `Subtotal` anywhere marks the row.
    ///
    /// Broader than `Exact`: it also drops rows such as "Total population".
    Substring,
}

/// Options for a single `clean` call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    /// Zero-based row holding the column names.
    pub header_row: usize,
    pub summary_match: SummaryMatch,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            header_row: DEFAULT_HEADER_ROW,
            summary_match: SummaryMatch::default(),
        }
    }
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }

    #[must_use]
    pub fn with_summary_match(mut self, summary_match: SummaryMatch) -> Self {
        self.summary_match = summary_match;
        self
    }
}

/// A per-table business rule applied after cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fixup {
    /// Drop rows whose text in `column` contains `needle`.
    DropRowsContaining { column: String, needle: String },
    /// Replace each value in `column` with its 1-based first-seen position.
    EncodeOrdinal { column: String },
    /// Replace an exact text value in `column`.
    ReplaceValue {
        column: String,
        from: String,
        to: String,
    },
    /// Rename an identifier column.
    RenameColumn { from: String, to: String },
}

impl Fixup {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DropRowsContaining { .. } => "drop_rows_containing",
            Self::EncodeOrdinal { .. } => "encode_ordinal",
            Self::ReplaceValue { .. } => "replace_value",
            Self::RenameColumn { .. } => "rename_column",
        }
    }
}

fn default_table_prefix() -> String {
    "Table".to_string()
}

/// Describes how to load one workbook: which sheets, how to clean them,
/// and which fixups apply to which logical table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    /// Regular expression matched against the start of each sheet name.
    pub sheet_pattern: String,
    /// Logical tables are named `"<prefix> <n>"` in selection order.
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
    #[serde(default)]
    pub clean: CleanOptions,
    /// Fixups keyed by logical table name.
    #[serde(default)]
    pub fixups: BTreeMap<String, Vec<Fixup>>,
}

impl DatasetConfig {
    pub fn new(name: impl Into<String>, sheet_pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sheet_pattern: sheet_pattern.into(),
            table_prefix: default_table_prefix(),
            clean: CleanOptions::default(),
            fixups: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_clean_options(mut self, clean: CleanOptions) -> Self {
        self.clean = clean;
        self
    }

    #[must_use]
    pub fn with_fixup(mut self, table: impl Into<String>, fixup: Fixup) -> Self {
        self.fixups.entry(table.into()).or_default().push(fixup);
        self
    }

    /// Logical name for the sheet at `index` in selection order.
    pub fn table_name(&self, index: usize) -> String {
        format!("{} {}", self.table_prefix, index + 1)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|err| match err {
            ConfigError::Json(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_use_row_four_and_exact_match() {
        let options = CleanOptions::default();
        assert_eq!(options.header_row, 4);
        assert_eq!(options.summary_match, SummaryMatch::Exact);
    }

    #[test]
    fn table_names_are_one_based() {
        let config = DatasetConfig::new("admitted", r"Table AC\.\d+");
        assert_eq!(config.table_name(0), "Table 1");
        assert_eq!(config.table_name(5), "Table 6");
    }

    #[test]
    fn config_parses_with_defaults() {
        let json = r#"{
            "name": "custom",
            "sheet_pattern": "Table X\\.\\d+",
            "fixups": {
                "Table 2": [
                    { "kind": "replace_value", "column": "Sex", "from": "M", "to": "Male" }
                ]
            }
        }"#;
        let config = DatasetConfig::from_json_str(json).expect("parse config");
        assert_eq!(config.table_prefix, "Table");
        assert_eq!(config.clean, CleanOptions::default());
        assert_eq!(
            config.fixups["Table 2"],
            vec![Fixup::ReplaceValue {
                column: "Sex".to_string(),
                from: "M".to_string(),
                to: "Male".to_string(),
            }]
        );
    }

    #[test]
    fn config_rejects_unknown_fixup_kind() {
        let json = r#"{
            "name": "custom",
            "sheet_pattern": "x",
            "fixups": { "Table 1": [ { "kind": "explode" } ] }
        }"#;
        assert!(DatasetConfig::from_json_str(json).is_err());
    }
}
