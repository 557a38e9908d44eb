//! Integration tests for reading a directory of CSV exports as a workbook.

use std::fs;

use mhd_ingest::{IngestError, open_workbook, select_sheets};
use mhd_model::CellValue;
use tempfile::TempDir;

fn write_exports(dir: &TempDir) {
    fs::write(dir.path().join("Contents.csv"), "Contents\nTable AC.1,Hospitalisations\n").unwrap();
    fs::write(
        dir.path().join("Table AC.1.csv"),
        "Table AC.1\n,,\n,,\n,,\nState,2012\u{2013}13,2013\u{2013}14\nNSW,\u{2014},n.a.\nTotal,12,14\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("Table AC.2.csv"),
        "Table AC.2\n,,\n,,\n,,\nAge group,2012-13\n0-14,3.5\n",
    )
    .unwrap();
}

#[test]
fn directory_opens_as_workbook() {
    let dir = TempDir::new().unwrap();
    write_exports(&dir);

    let mut workbook = open_workbook(dir.path()).unwrap();
    assert_eq!(workbook.location(), dir.path());
    assert_eq!(
        workbook.sheet_names(),
        vec!["Contents", "Table AC.1", "Table AC.2"]
    );

    let selected = select_sheets(&workbook.sheet_names(), r"Table AC\.\d+").unwrap();
    assert_eq!(selected, vec!["Table AC.1", "Table AC.2"]);

    let sheet = workbook.read_sheet("Table AC.1").unwrap();
    assert_eq!(sheet.name, "Table AC.1");
    assert_eq!(sheet.height(), 7);
    assert_eq!(sheet.cell(4, 0), &CellValue::from("State"));
    assert_eq!(sheet.cell(5, 1), &CellValue::from("\u{2014}"));
    assert_eq!(sheet.cell(6, 1), &CellValue::Number(12.0));

    let sheet = workbook.read_sheet("Table AC.2").unwrap();
    assert_eq!(sheet.cell(5, 1), &CellValue::Number(3.5));
}

#[test]
fn unknown_sheet_is_reported() {
    let dir = TempDir::new().unwrap();
    write_exports(&dir);

    let mut workbook = open_workbook(dir.path()).unwrap();
    let err = workbook.read_sheet("Table AC.9").unwrap_err();
    assert!(matches!(err, IngestError::UnknownSheet { ref sheet, .. } if sheet == "Table AC.9"));
}

#[test]
fn missing_path_is_not_found() {
    let dir = TempDir::new().unwrap();
    let result = open_workbook(&dir.path().join("missing.xlsx"));
    assert!(matches!(result, Err(IngestError::NotFound { .. })));
}
