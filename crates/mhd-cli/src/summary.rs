use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mhd_cli::pipeline::{LoadReport, LoadedTable};
use mhd_model::{DatasetConfig, format_numeric};
use mhd_transform::{GroupTotal, year_range};

pub fn print_sheets(names: &[String], selected: Option<&[String]>) {
    let mut table = Table::new();
    let mut header = vec![header_cell("#"), header_cell("Sheet")];
    if selected.is_some() {
        header.push(header_cell("Selected"));
    }
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for (idx, name) in names.iter().enumerate() {
        let mut row = vec![dim_cell(idx + 1), Cell::new(name)];
        if let Some(selected) = selected {
            row.push(if selected.contains(name) {
                Cell::new("✓")
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold)
            } else {
                dim_cell("-")
            });
        }
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_load_summary(dataset: &DatasetConfig, report: &LoadReport) {
    println!("Dataset: {}", dataset.name);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Sheet"),
        header_cell("Columns"),
        header_cell("Years"),
        header_cell("Rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for loaded in &report.tables {
        table.add_row(vec![
            Cell::new(&loaded.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&loaded.sheet),
            Cell::new(loaded.table.id_columns.join(", ")),
            years_cell(loaded),
            Cell::new(loaded.table.len()),
        ]);
    }
    for failure in &report.failures {
        table.add_row(vec![
            Cell::new(&failure.table).fg(Color::Red),
            Cell::new(&failure.sheet).fg(Color::Red),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("failed")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} sheets", report.tables.len() + report.failures.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(report.total_rows()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if !report.unmatched_fixups.is_empty() {
        println!(
            "Note: fixups for {} matched no loaded sheet",
            report.unmatched_fixups.join(", ")
        );
    }
    print_failures(report);
}

pub fn print_failures(report: &LoadReport) {
    if report.failures.is_empty() {
        return;
    }
    eprintln!("Errors:");
    for failure in &report.failures {
        eprintln!("- {} ({}): {:#}", failure.table, failure.sheet, failure.error);
    }
}

/// Prints a preview of one table; `columns` pairs each header with its rendered values.
pub fn print_preview(name: &str, total_rows: usize, columns: &[(String, Vec<String>)]) {
    println!();
    println!("{name} (first {} of {total_rows} rows):", preview_height(columns));
    let mut table = Table::new();
    table.set_header(
        columns
            .iter()
            .map(|(header, _)| header_cell(header))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for idx in 0..preview_height(columns) {
        table.add_row(
            columns
                .iter()
                .map(|(_, values)| match values.get(idx) {
                    Some(value) if !value.is_empty() => Cell::new(value),
                    _ => dim_cell("null"),
                })
                .collect::<Vec<_>>(),
        );
    }
    let last = columns.len().saturating_sub(1);
    align_column(&mut table, last, CellAlignment::Right);
    println!("{table}");
}

fn preview_height(columns: &[(String, Vec<String>)]) -> usize {
    columns.first().map_or(0, |(_, values)| values.len())
}

pub fn print_group_totals(loaded: &LoadedTable, by: &str, groups: &[GroupTotal]) {
    println!("{} ({}), grouped by {by}:", loaded.name, loaded.sheet);
    let mut table = Table::new();
    table.set_header(vec![header_cell(by), header_cell("Total"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut total = 0.0;
    for group in groups {
        total += group.total;
        table.add_row(vec![
            Cell::new(&group.key),
            Cell::new(format_numeric(group.total)),
            dim_cell(group.rows),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format_numeric(total)).add_attribute(Attribute::Bold),
        dim_cell(groups.iter().map(|group| group.rows).sum::<usize>()),
    ]);
    println!("{table}");
}

pub fn print_presets(presets: &[DatasetConfig]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Sheet pattern"),
        header_cell("Header row"),
        header_cell("Fixups"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for preset in presets {
        let fixups: Vec<String> = preset
            .fixups
            .iter()
            .map(|(name, fixups)| {
                let labels: Vec<&str> = fixups.iter().map(|fixup| fixup.label()).collect();
                format!("{name}: {}", labels.join(", "))
            })
            .collect();
        table.add_row(vec![
            Cell::new(&preset.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&preset.sheet_pattern),
            Cell::new(preset.clean.header_row),
            if fixups.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(fixups.join("\n"))
            },
        ]);
    }
    println!("{table}");
}

fn years_cell(loaded: &LoadedTable) -> Cell {
    match year_range(&loaded.table) {
        Some((first, last)) if first == last => Cell::new(first),
        Some((first, last)) => Cell::new(format!("{first}-{last}")),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
