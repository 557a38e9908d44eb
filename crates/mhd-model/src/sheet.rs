use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::cell::CellValue;

/// One worksheet as a grid of parsed cells.
///
/// Rows are stored at their absolute worksheet positions: `rows[0]` is the
/// first row of the sheet even when it is blank. Rows may be ragged; missing
/// trailing cells read as [`CellValue::Empty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Number of rows, including leading blank rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// SHA-256 over the sheet name and every cell, hex encoded.
    ///
    /// Two sheets with the same hash clean to the same table.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        hasher.update([0u8]);
        for row in &self.rows {
            for cell in row {
                match cell {
                    CellValue::Number(value) => {
                        hasher.update([1u8]);
                        hasher.update(value.to_bits().to_le_bytes());
                    }
                    CellValue::Text(value) => {
                        hasher.update([2u8]);
                        hasher.update((value.len() as u64).to_le_bytes());
                        hasher.update(value.as_bytes());
                    }
                    CellValue::Empty => hasher.update([3u8]),
                }
            }
            hasher.update([0xffu8]);
        }
        hex::encode(hasher.finalize())
    }
}
