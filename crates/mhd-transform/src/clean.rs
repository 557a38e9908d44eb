//! Reshapes one raw worksheet into a tidy `{ids.., Year, Count}` table.
//!
//! The steps run in a fixed order; later steps rely on earlier ones:
//!
//! 1. read column names from the header row, keep the rows below it
//! 2. replace missing-value tokens
//! 3. drop summary rows
//! 4. normalize dashes in headers and cut at the first `-`
//! 5. drop derived "Average annual change" columns
//! 6. classify digit-only headers as year columns
//! 7. drop rows with no value in every year column
//! 8. apply canonical identifier column names
//! 9. melt year columns into `Year`/`Count`
//! 10. parse `Year` as an integer

use std::collections::BTreeSet;

use mhd_model::{CellValue, CleanOptions, COUNT_COLUMN, RawSheet, TidyRow, TidyTable, YEAR_COLUMN};
use tracing::{debug, debug_span, warn};

use crate::error::{CleanError, Result};
use crate::header::{header_name, is_derived_column, is_year_header, normalize_header};
use crate::tokens::{canonical_column_name, is_summary_cell, replace_missing};

/// A surviving source column and its final name.
#[derive(Debug, Clone)]
struct Column {
    source: usize,
    name: String,
}

/// Cleans one worksheet.
///
/// The input sheet is not modified. The output lists rows in source order
/// and, within each source row, years in ascending order.
///
/// # Errors
///
/// - [`CleanError::Schema`] when `options.header_row` is past the end of the
///   sheet, when two columns end up with the same name, or when an
///   identifier column would shadow `Year` or `Count`.
/// - [`CleanError::YearParse`] when a year header does not fit an `i32`.
pub fn clean(sheet: &RawSheet, options: &CleanOptions) -> Result<TidyTable> {
    let span = debug_span!("clean", sheet = %sheet.name);
    let _guard = span.enter();

    let header_row = options.header_row;
    if header_row >= sheet.height() {
        return Err(CleanError::schema(
            &sheet.name,
            format!(
                "header row {header_row} is past the end of the sheet ({} rows)",
                sheet.height()
            ),
        ));
    }
    let width = sheet.width();
    if width == 0 {
        return Err(CleanError::schema(&sheet.name, "sheet has no columns"));
    }

    let raw_headers: Vec<String> = (0..width)
        .map(|col| header_name(sheet.cell(header_row, col), col))
        .collect();
    let mut rows: Vec<Vec<CellValue>> = sheet.rows[header_row + 1..]
        .iter()
        .map(|row| {
            (0..width)
                .map(|col| row.get(col).cloned().unwrap_or(CellValue::Empty))
                .collect()
        })
        .collect();
    let data_rows = rows.len();

    let mut replaced = 0usize;
    for cell in rows.iter_mut().flatten() {
        if let Some(replacement) = replace_missing(cell) {
            *cell = replacement;
            replaced += 1;
        }
    }

    rows.retain(|row| {
        !row
            .iter()
            .any(|cell| is_summary_cell(cell, options.summary_match))
    });
    let summary_dropped = data_rows - rows.len();

    let mut id_columns: Vec<Column> = Vec::new();
    let mut year_columns: Vec<(Column, i32)> = Vec::new();
    let mut derived = 0usize;
    for (source, raw) in raw_headers.iter().enumerate() {
        if is_derived_column(raw) {
            derived += 1;
            continue;
        }
        let normalized = normalize_header(raw);
        if is_year_header(&normalized) {
            let year = normalized
                .parse::<i32>()
                .map_err(|_| CleanError::YearParse {
                    sheet: sheet.name.clone(),
                    header: normalized.clone(),
                })?;
            year_columns.push((
                Column {
                    source,
                    name: normalized,
                },
                year,
            ));
        } else {
            id_columns.push(Column {
                source,
                name: canonical_column_name(&normalized).to_string(),
            });
        }
    }
    check_column_names(&sheet.name, &id_columns, &year_columns)?;
    year_columns.sort_by_key(|(_, year)| *year);

    let before_empty = rows.len();
    if !year_columns.is_empty() {
        rows.retain(|row| {
            year_columns
                .iter()
                .any(|(column, _)| !row[column.source].is_empty())
        });
    }
    let empty_dropped = before_empty - rows.len();

    debug!(
        data_rows,
        replaced,
        summary_dropped,
        derived_columns = derived,
        year_columns = year_columns.len(),
        empty_dropped,
        "sheet normalized"
    );

    let mut table = TidyTable::new(id_columns.iter().map(|c| c.name.clone()).collect());
    if year_columns.is_empty() {
        warn!(sheet = %sheet.name, "sheet has no year columns");
        return Ok(table);
    }

    table.rows.reserve(rows.len() * year_columns.len());
    for row in &rows {
        let ids: Vec<CellValue> = id_columns
            .iter()
            .map(|column| row[column.source].clone())
            .collect();
        for (column, year) in &year_columns {
            table.push_row(TidyRow {
                ids: ids.clone(),
                year: *year,
                count: row[column.source].clone(),
            });
        }
    }
    debug!(rows = table.len(), "sheet melted");
    Ok(table)
}

fn check_column_names(
    sheet: &str,
    id_columns: &[Column],
    year_columns: &[(Column, i32)],
) -> Result<()> {
    let mut seen = BTreeSet::new();
    let names = id_columns
        .iter()
        .chain(year_columns.iter().map(|(column, _)| column));
    for column in names {
        if !seen.insert(column.name.as_str()) {
            return Err(CleanError::schema(
                sheet,
                format!("duplicate column name '{}' after normalization", column.name),
            ));
        }
    }
    for column in id_columns {
        if column.name == YEAR_COLUMN || column.name == COUNT_COLUMN {
            return Err(CleanError::schema(
                sheet,
                format!(
                    "identifier column '{}' collides with the melted output",
                    column.name
                ),
            ));
        }
    }
    Ok(())
}
