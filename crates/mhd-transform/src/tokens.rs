//! Fixed lookup tables used by the cleaner.
//!
//! All tables are closed sets: a value not listed here passes through
//! unchanged. Extend the tables instead of adding fuzzy matching.

use mhd_model::{CellValue, SummaryMatch};

/// What a missing-value token stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// "Rounded to zero".
    Zero,
    /// Not applicable, not available, not published or blank.
    NoValue,
}

impl Replacement {
    pub fn to_cell(self) -> CellValue {
        match self {
            Self::Zero => CellValue::Number(0.0),
            Self::NoValue => CellValue::Empty,
        }
    }
}

/// Missing-value tokens from the workbooks' general information sheet.
pub const MISSING_VALUE_TOKENS: &[(&str, Replacement)] = &[
    ("\u{2014}", Replacement::Zero),
    (". .", Replacement::NoValue),
    ("n.a.", Replacement::NoValue),
    ("n.p.", Replacement::NoValue),
    ("nan", Replacement::NoValue),
    (" ", Replacement::NoValue),
];

/// Cell values that mark a row as an aggregate of other rows.
pub const SUMMARY_TOKENS: &[&str] = &["Total", "Subtotal", "All"];

/// Tokens searched for when summary rows are matched by substring.
pub const SUBSTRING_SUMMARY_TOKENS: &[&str] = &["Total", "Subtotal"];

/// Identifier columns that are named differently across sheets.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("State\nTerritory", "State"),
    ("State/Territory", "State"),
    ("Count", "Count_Desc"),
];

/// Returns the replacement for a cell holding exactly a missing-value token.
pub fn replace_missing(cell: &CellValue) -> Option<CellValue> {
    let text = cell.as_text()?;
    MISSING_VALUE_TOKENS
        .iter()
        .find(|(token, _)| *token == text)
        .map(|(_, replacement)| replacement.to_cell())
}

/// Returns true when `cell` marks a summary row under `mode`.
pub fn is_summary_cell(cell: &CellValue, mode: SummaryMatch) -> bool {
    if cell.is_empty() {
        return false;
    }
    let text = cell.display_string();
    match mode {
        SummaryMatch::Exact => SUMMARY_TOKENS.contains(&text.as_str()),
        SummaryMatch::Substring => SUBSTRING_SUMMARY_TOKENS
            .iter()
            .any(|token| text.contains(token)),
    }
}

/// Canonical name for an identifier column.
pub fn canonical_column_name(name: &str) -> &str {
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, canonical)| *canonical)
}
