//! A directory of CSV exports treated as a workbook.

use std::path::{Path, PathBuf};

use mhd_model::RawSheet;
use tracing::debug;

use crate::discovery::list_csv_files;
use crate::error::{IngestError, Result};
use crate::workbook::WorkbookSource;

use super::reader::read_csv_sheet;

/// One `.csv` file per sheet; the file stem is the sheet name.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    dir: PathBuf,
    sheets: Vec<(String, PathBuf)>,
}

impl CsvDirectory {
    pub fn open(dir: &Path) -> Result<Self> {
        let sheets = list_csv_files(dir)?
            .into_iter()
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?.to_string();
                Some((stem, path))
            })
            .collect();
        Ok(Self {
            dir: dir.to_path_buf(),
            sheets,
        })
    }
}

impl WorkbookSource for CsvDirectory {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawSheet> {
        let (_, path) = self
            .sheets
            .iter()
            .find(|(sheet, _)| sheet == name)
            .ok_or_else(|| IngestError::UnknownSheet {
                path: self.dir.clone(),
                sheet: name.to_string(),
            })?;
        let sheet = read_csv_sheet(path, name)?;
        debug!(sheet = name, rows = sheet.height(), "read csv sheet");
        Ok(sheet)
    }

    fn location(&self) -> &Path {
        &self.dir
    }
}
