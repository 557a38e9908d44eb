use std::fmt;

use serde::{Deserialize, Serialize};

/// A single worksheet cell after parsing.
///
/// `Empty` is the "no value" marker: blank cells and the missing-value
/// tokens that mean "not available" both end up here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Builds a text cell, mapping the empty string to `Empty`.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// String form used when matching cells against fixed tokens.
    ///
    /// Numbers drop trailing zeros and `Empty` renders as `"nan"`, so a
    /// blank cell never equals a real token.
    pub fn display_string(&self) -> String {
        match self {
            Self::Number(value) => format_numeric(*value),
            Self::Text(value) => value.clone(),
            Self::Empty => "nan".to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => f.write_str(&format_numeric(*value)),
            Self::Text(value) => f.write_str(value),
            Self::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// Formats a floating-point number without trailing zeros.
///
/// # Examples
///
/// ```
/// use mhd_model::format_numeric;
///
/// assert_eq!(format_numeric(2012.0), "2012");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_becomes_empty_cell() {
        assert_eq!(CellValue::text(""), CellValue::Empty);
        assert_eq!(CellValue::from("NSW"), CellValue::Text("NSW".to_string()));
    }

    #[test]
    fn display_string_matches_token_rules() {
        assert_eq!(CellValue::Number(5.0).display_string(), "5");
        assert_eq!(CellValue::Number(2.25).display_string(), "2.25");
        assert_eq!(CellValue::Empty.display_string(), "nan");
        assert_eq!(CellValue::from("Total").display_string(), "Total");
    }

    #[test]
    fn format_numeric_keeps_integers_intact() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(-3.0), "-3");
        assert_eq!(format_numeric(1e21), "1000000000000000000000");
    }
}
