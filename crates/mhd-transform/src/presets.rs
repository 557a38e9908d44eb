//! Built-in dataset configurations for the published workbooks.

use mhd_model::{DatasetConfig, Fixup};

pub const ADMITTED_PATIENTS: &str = "admitted-patients";
pub const CONSUMER_OUTCOMES: &str = "consumer-outcomes";

/// Names accepted by [`preset`].
pub const PRESET_NAMES: &[&str] = &[ADMITTED_PATIENTS, CONSUMER_OUTCOMES];

/// Admitted patient care workbook (`Table AC.n` sheets).
pub fn admitted_patients() -> DatasetConfig {
    DatasetConfig::new(ADMITTED_PATIENTS, r"Table AC\.\d+")
        // Quarterly table also carries whole-year totals.
        .with_fixup(
            "Table 6",
            Fixup::DropRowsContaining {
                column: "Quarter".to_string(),
                needle: "Financial Year".to_string(),
            },
        )
        .with_fixup(
            "Table 6",
            Fixup::EncodeOrdinal {
                column: "Quarter".to_string(),
            },
        )
        .with_fixup(
            "Table 3",
            Fixup::ReplaceValue {
                column: "Age group".to_string(),
                from: "85 years and over".to_string(),
                to: "85 years and older".to_string(),
            },
        )
        .with_fixup(
            "Table 5",
            Fixup::ReplaceValue {
                column: "Demographic".to_string(),
                from: "Quintile 1 (most disadvantaged)".to_string(),
                to: "Quintile 1".to_string(),
            },
        )
        .with_fixup(
            "Table 5",
            Fixup::ReplaceValue {
                column: "Demographic".to_string(),
                from: "Quintile 5 (least disadvantaged)".to_string(),
                to: "Quintile 5".to_string(),
            },
        )
}

/// National outcomes and casemix collection workbook (`Table NOCC.n` sheets).
pub fn consumer_outcomes() -> DatasetConfig {
    DatasetConfig::new(CONSUMER_OUTCOMES, r"Table NOCC\.\d+")
}

pub fn preset(name: &str) -> Option<DatasetConfig> {
    match name {
        ADMITTED_PATIENTS => Some(admitted_patients()),
        CONSUMER_OUTCOMES => Some(consumer_outcomes()),
        _ => None,
    }
}
