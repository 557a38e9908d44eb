//! Column header normalization.

use std::sync::LazyLock;

use mhd_model::CellValue;
use regex::Regex;

/// Pre-aggregated "Average annual change" rate columns, possibly wrapped
/// over several lines in the source header.
static DERIVED_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*average.*annual.*change").expect("valid derived column pattern")
});

/// Column name for a header cell; blank headers are named after their position.
pub fn header_name(cell: &CellValue, col: usize) -> String {
    match cell {
        CellValue::Empty => format!("Unnamed: {col}"),
        other => other.display_string(),
    }
}

/// Replaces en and em dashes with `-` and keeps the text before the first `-`.
///
/// `"2012–13"` and `"2012-13"` both become `"2012"`; headers without a dash
/// are returned unchanged.
pub fn normalize_header(raw: &str) -> String {
    let unified: String = raw
        .chars()
        .map(|ch| match ch {
            '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .collect();
    match unified.split_once('-') {
        Some((left, _)) => left.to_string(),
        None => unified,
    }
}

/// A normalized header naming a calendar year: one or more ASCII digits.
pub fn is_year_header(normalized: &str) -> bool {
    !normalized.is_empty() && normalized.bytes().all(|b| b.is_ascii_digit())
}

/// True for raw headers of derived rate columns that must not be melted.
pub fn is_derived_column(raw: &str) -> bool {
    DERIVED_COLUMN.is_match(raw)
}
