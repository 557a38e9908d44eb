//! Conversion of tidy tables to Polars DataFrames.

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use mhd_model::{COUNT_COLUMN, TidyTable, YEAR_COLUMN};

use crate::polars::any_to_string;

/// Builds a DataFrame with one string column per identifier, then `Year`
/// (Int32) and `Count` (Float64).
///
/// Identifier cells with no value become nulls; numbers are rendered the
/// way they print. Counts that are not numeric (no value, or a token the
/// cleaner passed through such as `"<5"`) become nulls.
pub fn tidy_to_dataframe(table: &TidyTable) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.id_columns.len() + 2);

    for (idx, name) in table.id_columns.iter().enumerate() {
        let values: Vec<Option<String>> = table
            .rows
            .iter()
            .map(|row| {
                row.ids
                    .get(idx)
                    .filter(|cell| !cell.is_empty())
                    .map(ToString::to_string)
            })
            .collect();
        columns.push(Series::new(name.as_str().into(), values).into_column());
    }

    let years: Vec<i32> = table.rows.iter().map(|row| row.year).collect();
    columns.push(Series::new(YEAR_COLUMN.into(), years).into_column());

    let counts: Vec<Option<f64>> = table.rows.iter().map(|row| row.count.as_f64()).collect();
    columns.push(Series::new(COUNT_COLUMN.into(), counts).into_column());

    DataFrame::new(columns)
}

/// Renders every value of `column` as a string; nulls become empty strings.
pub fn column_strings(df: &DataFrame, column: &str) -> PolarsResult<Vec<String>> {
    let series = df.column(column)?;
    Ok((0..df.height())
        .map(|idx| any_to_string(series.get(idx).unwrap_or(AnyValue::Null)))
        .collect())
}

/// Renders the first `limit` rows of `table` column by column for display.
///
/// Identifier and `Year` values come from the DataFrame. `Count` is taken
/// from the tidy rows, so a token such as `"<5"` stays visible instead of
/// showing as null next to real no-value cells.
pub fn preview_columns(
    table: &TidyTable,
    limit: usize,
) -> PolarsResult<Vec<(String, Vec<String>)>> {
    let df = tidy_to_dataframe(table)?.head(Some(limit));
    let mut columns = Vec::with_capacity(df.width());
    for name in df.get_column_names() {
        let values = if name.as_str() == COUNT_COLUMN {
            table
                .rows
                .iter()
                .take(limit)
                .map(|row| row.count.to_string())
                .collect()
        } else {
            column_strings(&df, name.as_str())?
        };
        columns.push((name.to_string(), values));
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhd_model::{CellValue, TidyRow};
    use polars::prelude::DataType;

    fn sample() -> TidyTable {
        let mut table = TidyTable::new(vec!["State".to_string(), "Age group".to_string()]);
        table.push_row(TidyRow {
            ids: vec![CellValue::from("NSW"), CellValue::from("0-14")],
            year: 2012,
            count: CellValue::Number(0.0),
        });
        table.push_row(TidyRow {
            ids: vec![CellValue::from("NSW"), CellValue::Empty],
            year: 2013,
            count: CellValue::Empty,
        });
        table.push_row(TidyRow {
            ids: vec![CellValue::Number(3.0), CellValue::from("15-24")],
            year: 2013,
            count: CellValue::from("<5"),
        });
        table
    }

    #[test]
    fn test_tidy_to_dataframe_schema() {
        let df = tidy_to_dataframe(&sample()).unwrap();
        assert_eq!(df.height(), 3);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["State", "Age group", "Year", "Count"]);
        assert_eq!(df.column("Year").unwrap().dtype(), &DataType::Int32);
        assert_eq!(df.column("Count").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("State").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_tidy_to_dataframe_nulls() {
        let df = tidy_to_dataframe(&sample()).unwrap();
        assert_eq!(df.column("Count").unwrap().null_count(), 2);
        assert_eq!(df.column("Age group").unwrap().null_count(), 1);
        assert_eq!(
            column_strings(&df, "State").unwrap(),
            vec!["NSW", "NSW", "3"]
        );
        assert_eq!(column_strings(&df, "Count").unwrap(), vec!["0", "", ""]);
    }

    #[test]
    fn test_empty_table_keeps_columns() {
        let table = TidyTable::new(vec!["State".to_string()]);
        let df = tidy_to_dataframe(&table).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_preview_keeps_text_counts() {
        let columns = preview_columns(&sample(), 10).unwrap();
        let names: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["State", "Age group", "Year", "Count"]);
        assert_eq!(columns[2].1, vec!["2012", "2013", "2013"]);
        assert_eq!(columns[3].1, vec!["0", "", "<5"]);
    }

    #[test]
    fn test_preview_respects_limit() {
        let columns = preview_columns(&sample(), 2).unwrap();
        assert!(columns.iter().all(|(_, values)| values.len() == 2));
    }

    #[test]
    fn test_column_strings_unknown_column() {
        let df = tidy_to_dataframe(&sample()).unwrap();
        assert!(column_strings(&df, "Sex").is_err());
    }
}
