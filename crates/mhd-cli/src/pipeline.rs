//! Dataset loading: sheet selection, cleaning and fixups.
//!
//! Each selected sheet is read, cleaned through the cache and passed
//! through the dataset's fixups. A sheet that fails at any stage is
//! recorded and skipped; the remaining sheets still load.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use mhd_ingest::{WorkbookSource, select_sheets};
use mhd_model::{DatasetConfig, TidyTable};
use mhd_transform::{CleanCache, FixupRegistry};

/// A cleaned table and the sheet it came from.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// Logical name, `"<prefix> <n>"` in selection order.
    pub name: String,
    pub sheet: String,
    pub table: TidyTable,
}

/// A sheet that could not be loaded.
#[derive(Debug)]
pub struct SheetFailure {
    pub sheet: String,
    pub table: String,
    pub error: anyhow::Error,
}

/// Outcome of loading one dataset from a workbook.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Loaded tables in selection order.
    pub tables: Vec<LoadedTable>,
    pub failures: Vec<SheetFailure>,
    /// Tables with registered fixups that no selected sheet produced.
    pub unmatched_fixups: Vec<String>,
}

impl LoadReport {
    pub fn table(&self, name: &str) -> Option<&LoadedTable> {
        self.tables.iter().find(|loaded| loaded.name == name)
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|loaded| loaded.table.len()).sum()
    }
}

/// Loads every sheet of `source` selected by `config`.
///
/// Only an invalid sheet pattern fails the whole load; per-sheet errors end
/// up in [`LoadReport::failures`].
pub fn load_tables(
    source: &mut dyn WorkbookSource,
    config: &DatasetConfig,
    cache: &mut CleanCache,
) -> Result<LoadReport> {
    let span = info_span!(
        "load",
        dataset = %config.name,
        workbook = %source.location().display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let selected = select_sheets(&source.sheet_names(), &config.sheet_pattern)
        .with_context(|| format!("select sheets for dataset {}", config.name))?;
    if selected.is_empty() {
        warn!(pattern = %config.sheet_pattern, "no sheets match the dataset pattern");
    }
    let registry = FixupRegistry::from_config(config);

    let mut report = LoadReport::default();
    for (idx, sheet) in selected.iter().enumerate() {
        let name = config.table_name(idx);
        let sheet_span = info_span!("sheet", sheet = %sheet, table = %name);
        let _sheet_guard = sheet_span.enter();
        match load_sheet(source, sheet, &name, config, &registry, cache) {
            Ok(table) => {
                info!(
                    rows = table.len(),
                    id_columns = table.id_columns.len(),
                    "loaded table"
                );
                report.tables.push(LoadedTable {
                    name,
                    sheet: sheet.clone(),
                    table,
                });
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "sheet failed to load");
                report.failures.push(SheetFailure {
                    sheet: sheet.clone(),
                    table: name,
                    error,
                });
            }
        }
    }

    let produced: Vec<String> = (0..selected.len())
        .map(|idx| config.table_name(idx))
        .collect();
    report.unmatched_fixups = registry
        .tables()
        .filter(|name| !produced.iter().any(|table| table == name))
        .map(ToString::to_string)
        .collect();
    if !report.unmatched_fixups.is_empty() {
        warn!(
            tables = %report.unmatched_fixups.join(", "),
            "fixups registered for tables that were not loaded"
        );
    }

    info!(
        tables = report.tables.len(),
        failures = report.failures.len(),
        cache_hits = cache.hits(),
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );
    Ok(report)
}

fn load_sheet(
    source: &mut dyn WorkbookSource,
    sheet: &str,
    name: &str,
    config: &DatasetConfig,
    registry: &FixupRegistry,
    cache: &mut CleanCache,
) -> Result<TidyTable> {
    let raw = source
        .read_sheet(sheet)
        .with_context(|| format!("read sheet {sheet}"))?;
    let cleaned = cache
        .get_or_clean(&raw, &config.clean)
        .with_context(|| format!("clean sheet {sheet}"))?;
    registry
        .apply(name, TidyTable::clone(&cleaned))
        .with_context(|| format!("apply fixups for {name}"))
}
