//! Group-and-sum aggregations over tidy tables.
//!
//! These produce the numbers a chart would plot (hospitalisations by
//! state, by age group, per year) without rendering anything.

use std::str::FromStr;

use mhd_model::{TidyRow, TidyTable, YEAR_COLUMN};

use crate::error::SummarizeError;

/// Keeps rows whose `column` equals one of `values`.
///
/// `column` may be an identifier column or `Year`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new(column: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            column: column.into(),
            values,
        }
    }

    pub fn year(year: i32) -> Self {
        Self::new(YEAR_COLUMN, vec![year.to_string()])
    }
}

impl FromStr for Filter {
    type Err = SummarizeError;

    /// Parses `COLUMN=VALUE[,VALUE...]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, values) = s
            .split_once('=')
            .ok_or_else(|| SummarizeError::InvalidFilter(s.to_string()))?;
        let column = column.trim();
        let values: Vec<String> = values
            .split(',')
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        if column.is_empty() || values.is_empty() {
            return Err(SummarizeError::InvalidFilter(s.to_string()));
        }
        Ok(Self::new(column, values))
    }
}

/// Sum of counts for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
    /// Rows that fell into the group, including rows without a numeric count.
    pub rows: usize,
}

/// Sums numeric counts of rows passing every filter, grouped by `by`.
///
/// Groups appear in first-seen order. Rows with no value in `by` are
/// skipped; counts that are not numbers add nothing to their group.
pub fn group_sum(
    table: &TidyTable,
    filters: &[Filter],
    by: &str,
) -> Result<Vec<GroupTotal>, SummarizeError> {
    let by_field = Field::resolve(table, by)?;
    let filter_fields = filters
        .iter()
        .map(|filter| Field::resolve(table, &filter.column).map(|field| (field, filter)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut groups: Vec<GroupTotal> = Vec::new();
    for row in &table.rows {
        let keep = filter_fields.iter().all(|(field, filter)| {
            field
                .value(row)
                .is_some_and(|value| filter.values.contains(&value))
        });
        if !keep {
            continue;
        }
        let Some(key) = by_field.value(row) else {
            continue;
        };
        let amount = row.count.as_f64().unwrap_or(0.0);
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => {
                group.total += amount;
                group.rows += 1;
            }
            None => groups.push(GroupTotal {
                key,
                total: amount,
                rows: 1,
            }),
        }
    }
    Ok(groups)
}

/// Sorts groups by total, largest first; ties keep their order.
pub fn sort_desc(groups: &mut [GroupTotal]) {
    groups.sort_by(|a, b| b.total.total_cmp(&a.total));
}

/// Smallest and largest year in the table.
pub fn year_range(table: &TidyTable) -> Option<(i32, i32)> {
    let years = table.years();
    Some((*years.first()?, *years.last()?))
}

enum Field {
    Year,
    Id(usize),
}

impl Field {
    fn resolve(table: &TidyTable, column: &str) -> Result<Self, SummarizeError> {
        if column == YEAR_COLUMN {
            return Ok(Self::Year);
        }
        table
            .column_index(column)
            .map(Self::Id)
            .ok_or_else(|| SummarizeError::UnknownColumn {
                column: column.to_string(),
                available: table.id_columns.clone(),
            })
    }

    fn value(&self, row: &TidyRow) -> Option<String> {
        match self {
            Self::Year => Some(row.year.to_string()),
            Self::Id(idx) => row
                .ids
                .get(*idx)
                .filter(|cell| !cell.is_empty())
                .map(ToString::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhd_model::CellValue;

    fn table() -> TidyTable {
        let mut table = TidyTable::new(vec!["State".to_string(), "Measure".to_string()]);
        let rows = [
            ("NSW", "Hospitalisations", 2012, CellValue::Number(10.0)),
            ("NSW", "Hospitalisations", 2013, CellValue::Number(12.0)),
            ("Vic", "Hospitalisations", 2012, CellValue::Number(30.0)),
            ("Vic", "Patients", 2012, CellValue::Number(5.0)),
            ("Tas", "Hospitalisations", 2012, CellValue::Empty),
        ];
        for (state, measure, year, count) in rows {
            table.push_row(TidyRow {
                ids: vec![CellValue::from(state), CellValue::from(measure)],
                year,
                count,
            });
        }
        table
    }

    #[test]
    fn sums_by_state_for_one_measure() {
        let filters = vec!["Measure=Hospitalisations".parse::<Filter>().unwrap()];
        let groups = group_sum(&table(), &filters, "State").unwrap();
        let totals: Vec<(&str, f64)> = groups.iter().map(|g| (g.key.as_str(), g.total)).collect();
        assert_eq!(totals, vec![("NSW", 22.0), ("Vic", 30.0), ("Tas", 0.0)]);
        assert_eq!(groups[2].rows, 1);
    }

    #[test]
    fn filters_accept_several_values_and_years() {
        let filters = vec![
            "Measure=Hospitalisations, Patients".parse::<Filter>().unwrap(),
            Filter::year(2012),
        ];
        let mut groups = group_sum(&table(), &filters, "State").unwrap();
        sort_desc(&mut groups);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Vic", "NSW", "Tas"]);
        assert_eq!(groups[0].total, 35.0);
    }

    #[test]
    fn groups_by_year() {
        let groups = group_sum(&table(), &[], YEAR_COLUMN).unwrap();
        let totals: Vec<(&str, f64)> = groups.iter().map(|g| (g.key.as_str(), g.total)).collect();
        assert_eq!(totals, vec![("2012", 45.0), ("2013", 12.0)]);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let err = group_sum(&table(), &[], "Age group").unwrap_err();
        assert!(matches!(err, SummarizeError::UnknownColumn { .. }));
    }

    #[test]
    fn malformed_filters_are_rejected() {
        assert!("Measure".parse::<Filter>().is_err());
        assert!("=x".parse::<Filter>().is_err());
        assert!("Measure=".parse::<Filter>().is_err());
    }

    #[test]
    fn empty_table_has_no_groups_or_range() {
        let empty = TidyTable::new(vec!["State".to_string()]);
        assert!(group_sum(&empty, &[], "State").unwrap().is_empty());
        assert_eq!(year_range(&empty), None);
        assert_eq!(year_range(&table()), Some((2012, 2013)));
    }
}
