use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Name of the melted year field.
pub const YEAR_COLUMN: &str = "Year";
/// Name of the melted value field.
pub const COUNT_COLUMN: &str = "Count";

/// One observation: identifier values, one year and its count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidyRow {
    pub ids: Vec<CellValue>,
    pub year: i32,
    pub count: CellValue,
}

/// Long-format table with columns `{..id_columns.., Year, Count}`.
///
/// `rows[i].ids` is aligned with `id_columns`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TidyTable {
    pub id_columns: Vec<String>,
    pub rows: Vec<TidyRow>,
}

impl TidyTable {
    pub fn new(id_columns: Vec<String>) -> Self {
        Self {
            id_columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: TidyRow) {
        self.rows.push(row);
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.id_columns.iter().position(|name| name == column)
    }

    /// Distinct years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.rows
            .iter()
            .map(|row| row.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct values of an identifier column in first-seen order.
    pub fn distinct_values(&self, column: &str) -> Vec<CellValue> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        let mut seen: Vec<CellValue> = Vec::new();
        for row in &self.rows {
            if let Some(value) = row.ids.get(idx) {
                if !seen.contains(value) {
                    seen.push(value.clone());
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TidyTable {
        let mut table = TidyTable::new(vec!["State".to_string(), "Measure".to_string()]);
        for (state, year) in [("NSW", 2013), ("Vic", 2012), ("NSW", 2012)] {
            table.push_row(TidyRow {
                ids: vec![CellValue::from(state), CellValue::from("Patients")],
                year,
                count: CellValue::Number(1.0),
            });
        }
        table
    }

    #[test]
    fn years_are_distinct_and_sorted() {
        assert_eq!(table().years(), vec![2012, 2013]);
    }

    #[test]
    fn column_index_looks_up_by_name() {
        let table = table();
        assert_eq!(table.column_index("State"), Some(0));
        assert_eq!(table.column_index("Age group"), None);
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let values = table().distinct_values("State");
        assert_eq!(values, vec![CellValue::from("NSW"), CellValue::from("Vic")]);
        assert!(table().distinct_values("Missing").is_empty());
    }
}
