//! Shared utilities for the mental-health table crates.
//!
//! This crate hands cleaned tables to Polars and provides `AnyValue`
//! helpers for rendering DataFrame cells.

pub mod frame;
pub mod polars;

pub use frame::{column_strings, preview_columns, tidy_to_dataframe};
pub use polars::{any_to_string, format_numeric};
