//! CLI argument definitions for the `mhd` loader.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use mhd_transform::Filter;

#[derive(Parser)]
#[command(
    name = "mhd",
    version,
    about = "Load and reshape published mental-health statistical tables",
    long_about = "Load published mental-health workbooks and reshape their \
                  wide year-by-column tables into tidy long-format tables.\n\n\
                  Reads .xlsx/.xls/.ods workbooks or directories of CSV sheet exports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the sheets of a workbook.
    Sheets(SheetsArgs),

    /// Load a dataset and print a per-table summary.
    Load(LoadArgs),

    /// Sum counts of one table grouped by a column.
    Summarize(SummarizeArgs),

    /// List the built-in dataset presets.
    Presets,
}

#[derive(Args)]
pub struct SheetsArgs {
    /// Workbook file, or a directory of CSV sheet exports.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Mark sheets whose name matches this regular expression.
    #[arg(long = "pattern", value_name = "REGEX")]
    pub pattern: Option<String>,
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("dataset_source")
        .required(true)
        .args(["dataset", "config"])
))]
pub struct DatasetArgs {
    /// Workbook file, or a directory of CSV sheet exports.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Built-in dataset preset (see `mhd presets`).
    #[arg(long = "dataset", value_name = "NAME")]
    pub dataset: Option<String>,

    /// JSON dataset configuration file.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Zero-based header row (overrides the dataset setting).
    #[arg(long = "header-row", value_name = "ROW")]
    pub header_row: Option<usize>,

    /// How summary rows are recognised (overrides the dataset setting).
    #[arg(long = "summary-match", value_enum)]
    pub summary_match: Option<SummaryMatchArg>,
}

#[derive(Args)]
pub struct LoadArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Print the first rows of this table (e.g. "Table 1").
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Number of rows to print with --table.
    #[arg(long = "rows", value_name = "N", default_value_t = 10)]
    pub rows: usize,
}

#[derive(Args)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Table to summarize (e.g. "Table 1").
    #[arg(long = "table", value_name = "NAME")]
    pub table: String,

    /// Column to group by; `Year` groups by year.
    #[arg(long = "by", value_name = "COLUMN")]
    pub by: String,

    /// Keep rows where COLUMN equals one of the values. Repeatable.
    #[arg(long = "where", value_name = "COLUMN=VALUE[,VALUE...]")]
    pub filters: Vec<Filter>,

    /// Keep rows from this year only.
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<i32>,

    /// Order groups by total, largest first.
    #[arg(long = "sort")]
    pub sort: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SummaryMatchArg {
    /// Cells equal to Total, Subtotal or All.
    Exact,
    /// Cells containing Total or Subtotal anywhere.
    Substring,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
