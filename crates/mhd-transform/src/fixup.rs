//! Per-table fixups applied after cleaning.
//!
//! Fixups are business rules for one logical table (dropping aggregate
//! buckets, unifying labels that changed wording between revisions). They
//! are registered by table name and never run inside [`crate::clean`].

use std::collections::BTreeMap;

use mhd_model::{CellValue, DatasetConfig, Fixup, TidyTable};
use tracing::debug;

use crate::error::FixupError;

/// Fixups keyed by logical table name, applied in registration order.
#[derive(Debug, Clone, Default)]
pub struct FixupRegistry {
    fixups: BTreeMap<String, Vec<Fixup>>,
}

impl FixupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DatasetConfig) -> Self {
        let mut registry = Self::new();
        for (table, fixups) in &config.fixups {
            for fixup in fixups {
                registry.register(table.as_str(), fixup.clone());
            }
        }
        registry
    }

    pub fn register(&mut self, table: impl Into<String>, fixup: Fixup) {
        self.fixups.entry(table.into()).or_default().push(fixup);
    }

    pub fn fixups_for(&self, table: &str) -> &[Fixup] {
        self.fixups.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Table names that have at least one fixup.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.fixups.keys().map(String::as_str)
    }

    /// Runs every fixup registered for `name` against `table`.
    pub fn apply(&self, name: &str, mut table: TidyTable) -> Result<TidyTable, FixupError> {
        for fixup in self.fixups_for(name) {
            apply_fixup(name, fixup, &mut table)?;
        }
        Ok(table)
    }
}

/// Applies one fixup in place.
pub fn apply_fixup(name: &str, fixup: &Fixup, table: &mut TidyTable) -> Result<(), FixupError> {
    match fixup {
        Fixup::DropRowsContaining { column, needle } => {
            let idx = require_column(name, fixup, table, column)?;
            let before = table.len();
            table.rows.retain(|row| {
                !row.ids[idx]
                    .as_text()
                    .is_some_and(|value| value.contains(needle.as_str()))
            });
            debug!(table = name, column = %column, dropped = before - table.len(), "dropped rows");
        }
        Fixup::EncodeOrdinal { column } => {
            let idx = require_column(name, fixup, table, column)?;
            let mut order: Vec<CellValue> = Vec::new();
            for row in &mut table.rows {
                let value = &row.ids[idx];
                if value.is_empty() {
                    continue;
                }
                let position = match order.iter().position(|seen| seen == value) {
                    Some(position) => position,
                    None => {
                        order.push(value.clone());
                        order.len() - 1
                    }
                };
                row.ids[idx] = CellValue::Number((position + 1) as f64);
            }
            debug!(table = name, column = %column, levels = order.len(), "encoded ordinal column");
        }
        Fixup::ReplaceValue { column, from, to } => {
            let idx = require_column(name, fixup, table, column)?;
            let mut replaced = 0usize;
            for row in &mut table.rows {
                if row.ids[idx].as_text() == Some(from.as_str()) {
                    row.ids[idx] = CellValue::text(to.as_str());
                    replaced += 1;
                }
            }
            debug!(table = name, column = %column, replaced, "replaced values");
        }
        Fixup::RenameColumn { from, to } => {
            let idx = require_column(name, fixup, table, from)?;
            if table.column_index(to).is_some() {
                return Err(FixupError::DuplicateColumn {
                    table: name.to_string(),
                    fixup: fixup.label(),
                    column: to.clone(),
                });
            }
            table.id_columns[idx] = to.clone();
        }
    }
    Ok(())
}

fn require_column(
    name: &str,
    fixup: &Fixup,
    table: &TidyTable,
    column: &str,
) -> Result<usize, FixupError> {
    table
        .column_index(column)
        .ok_or_else(|| FixupError::UnknownColumn {
            table: name.to_string(),
            fixup: fixup.label(),
            column: column.to_string(),
        })
}
