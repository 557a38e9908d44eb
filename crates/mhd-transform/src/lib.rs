//! Cleaning and reshaping of published statistical tables.
//!
//! This crate turns raw worksheet grids into tidy long-format tables:
//!
//! - **clean**: the generic wide-to-long table cleaner
//! - **tokens**: fixed lookup tables (missing values, summary rows, column aliases)
//! - **header**: column header normalization and year detection
//! - **fixup**: per-table business rules applied after cleaning
//! - **cache**: memoization keyed by sheet content
//! - **summarize**: group-and-sum aggregations for charting
//! - **presets**: built-in dataset configurations

pub mod cache;
pub mod clean;
pub mod error;
pub mod fixup;
pub mod header;
pub mod presets;
pub mod summarize;
pub mod tokens;

pub use cache::CleanCache;
pub use clean::clean;
pub use error::{CleanError, FixupError, Result, SummarizeError};
pub use fixup::{FixupRegistry, apply_fixup};
pub use presets::{PRESET_NAMES, admitted_patients, consumer_outcomes, preset};
pub use summarize::{Filter, GroupTotal, group_sum, sort_desc, year_range};
