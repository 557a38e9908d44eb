use anyhow::{Context, Result, anyhow};

use mhd_cli::pipeline::{LoadReport, load_tables};
use mhd_common::preview_columns;
use mhd_ingest::{open_workbook, select_sheets};
use mhd_model::{DatasetConfig, SummaryMatch};
use mhd_transform::{CleanCache, Filter, PRESET_NAMES, group_sum, preset, sort_desc};

use crate::cli::{DatasetArgs, LoadArgs, SheetsArgs, SummarizeArgs, SummaryMatchArg};
use crate::summary::{
    print_group_totals, print_load_summary, print_presets, print_preview, print_sheets,
};

pub fn run_presets() -> Result<()> {
    let presets: Vec<DatasetConfig> = PRESET_NAMES.iter().filter_map(|name| preset(name)).collect();
    print_presets(&presets);
    Ok(())
}

pub fn run_sheets(args: &SheetsArgs) -> Result<()> {
    let workbook = open_workbook(&args.workbook)
        .with_context(|| format!("open workbook {}", args.workbook.display()))?;
    let names = workbook.sheet_names();
    let selected = args
        .pattern
        .as_deref()
        .map(|pattern| select_sheets(&names, pattern))
        .transpose()?;
    print_sheets(&names, selected.as_deref());
    Ok(())
}

pub fn run_load(args: &LoadArgs) -> Result<LoadReport> {
    let (config, report) = load_dataset(&args.dataset)?;
    print_load_summary(&config, &report);

    if let Some(name) = &args.table {
        let loaded = report
            .table(name)
            .ok_or_else(|| unknown_table(name, &report))?;
        let columns = preview_columns(&loaded.table, args.rows)
            .with_context(|| format!("build preview for {name}"))?;
        print_preview(name, loaded.table.len(), &columns);
    }
    Ok(report)
}

pub fn run_summarize(args: &SummarizeArgs) -> Result<LoadReport> {
    let (_, report) = load_dataset(&args.dataset)?;
    let loaded = report
        .table(&args.table)
        .ok_or_else(|| unknown_table(&args.table, &report))?;

    let mut filters = args.filters.clone();
    if let Some(year) = args.year {
        filters.push(Filter::year(year));
    }
    let mut groups = group_sum(&loaded.table, &filters, &args.by)
        .with_context(|| format!("summarize {}", loaded.name))?;
    if args.sort {
        sort_desc(&mut groups);
    }
    print_group_totals(loaded, &args.by, &groups);
    Ok(report)
}

/// Resolves the dataset configuration and applies command-line overrides.
pub fn resolve_dataset(args: &DatasetArgs) -> Result<DatasetConfig> {
    let mut config = match (&args.dataset, &args.config) {
        (Some(name), _) => preset(name).ok_or_else(|| {
            anyhow!(
                "unknown dataset '{name}' (available: {})",
                PRESET_NAMES.join(", ")
            )
        })?,
        (None, Some(path)) => DatasetConfig::from_path(path)
            .with_context(|| format!("load dataset config {}", path.display()))?,
        (None, None) => return Err(anyhow!("either --dataset or --config is required")),
    };
    if let Some(header_row) = args.header_row {
        config.clean.header_row = header_row;
    }
    if let Some(mode) = args.summary_match {
        config.clean.summary_match = match mode {
            SummaryMatchArg::Exact => SummaryMatch::Exact,
            SummaryMatchArg::Substring => SummaryMatch::Substring,
        };
    }
    Ok(config)
}

fn load_dataset(args: &DatasetArgs) -> Result<(DatasetConfig, LoadReport)> {
    let config = resolve_dataset(args)?;
    let mut workbook = open_workbook(&args.workbook)
        .with_context(|| format!("open workbook {}", args.workbook.display()))?;
    let mut cache = CleanCache::new();
    let report = load_tables(workbook.as_mut(), &config, &mut cache)?;
    Ok((config, report))
}

fn unknown_table(name: &str, report: &LoadReport) -> anyhow::Error {
    let available: Vec<&str> = report
        .tables
        .iter()
        .map(|loaded| loaded.name.as_str())
        .collect();
    anyhow!(
        "table '{name}' was not loaded (available: {})",
        available.join(", ")
    )
}
