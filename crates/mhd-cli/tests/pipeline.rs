//! Integration tests for the pipeline module.

use std::fs;

use tempfile::TempDir;

use mhd_cli::pipeline::{LoadReport, load_tables};
use mhd_ingest::open_workbook;
use mhd_model::{CellValue, DatasetConfig, Fixup};
use mhd_transform::{CleanCache, admitted_patients};

const PREAMBLE: &str = "Mental health services in Australia\n,\n,\n,\n";

fn write_sheet(dir: &TempDir, name: &str, body: &str) {
    fs::write(dir.path().join(format!("{name}.csv")), format!("{PREAMBLE}{body}")).unwrap();
}

fn admitted_workbook() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Contents.csv"), "Contents\n").unwrap();
    write_sheet(
        &dir,
        "Table AC.1",
        "State/Territory,2012\u{2013}13,2013\u{2013}14,Average annual change\n\
         NSW,\u{2014},n.a.,0.1\n\
         Vic,4,5,0.2\n\
         Total,4,5,0.2\n",
    );
    fs::write(dir.path().join("Table AC.2.csv"), "Table AC.2\n").unwrap();
    write_sheet(
        &dir,
        "Table AC.3",
        "Age group,2012-13\n\
         85 years and over,7\n\
         0-14,3\n",
    );
    dir
}

fn load(dir: &TempDir, config: &DatasetConfig, cache: &mut CleanCache) -> LoadReport {
    let mut workbook = open_workbook(dir.path()).unwrap();
    load_tables(workbook.as_mut(), config, cache).unwrap()
}

fn render(report: &LoadReport) -> String {
    let mut lines = Vec::new();
    for loaded in &report.tables {
        lines.push(format!(
            "{} <- {}: [{}] {} rows",
            loaded.name,
            loaded.sheet,
            loaded.table.id_columns.join(", "),
            loaded.table.len()
        ));
    }
    for failure in &report.failures {
        lines.push(format!("{} <- {}: failed", failure.table, failure.sheet));
    }
    lines.join("\n")
}

#[test]
fn test_load_tables_names_and_isolates_failures() {
    let dir = admitted_workbook();
    let mut cache = CleanCache::new();
    let report = load(&dir, &admitted_patients(), &mut cache);

    insta::assert_snapshot!(render(&report), @r"
    Table 1 <- Table AC.1: [State] 4 rows
    Table 3 <- Table AC.3: [Age group] 2 rows
    Table 2 <- Table AC.2: failed
    ");
    assert!(report.has_failures());
    assert_eq!(report.total_rows(), 6);
    assert_eq!(report.unmatched_fixups, vec!["Table 5", "Table 6"]);

    let message = format!("{:#}", report.failures[0].error);
    assert!(message.contains("header row 4 is past the end"), "{message}");
}

#[test]
fn test_load_tables_applies_fixups() {
    let dir = admitted_workbook();
    let mut cache = CleanCache::new();
    let report = load(&dir, &admitted_patients(), &mut cache);

    let ages = report.table("Table 3").unwrap().table.distinct_values("Age group");
    assert_eq!(
        ages,
        vec![CellValue::from("85 years and older"), CellValue::from("0-14")]
    );

    let states = &report.table("Table 1").unwrap().table;
    assert_eq!(states.years(), vec![2012, 2013]);
    assert_eq!(states.rows[0].count, CellValue::Number(0.0));
    assert_eq!(states.rows[1].count, CellValue::Empty);
}

#[test]
fn test_failing_fixup_only_fails_its_table() {
    let dir = admitted_workbook();
    let config = DatasetConfig::new("custom", r"Table AC\.\d+").with_fixup(
        "Table 1",
        Fixup::EncodeOrdinal {
            column: "Quarter".to_string(),
        },
    );
    let mut cache = CleanCache::new();
    let report = load(&dir, &config, &mut cache);

    let failed: Vec<&str> = report
        .failures
        .iter()
        .map(|failure| failure.table.as_str())
        .collect();
    assert_eq!(failed, vec!["Table 1", "Table 2"]);
    assert!(report.table("Table 3").is_some());
    assert!(report.unmatched_fixups.is_empty());
}

#[test]
fn test_reload_hits_the_cache() {
    let dir = admitted_workbook();
    let mut cache = CleanCache::new();
    let first = load(&dir, &admitted_patients(), &mut cache);
    assert_eq!(cache.hits(), 0);

    let second = load(&dir, &admitted_patients(), &mut cache);
    assert_eq!(cache.hits(), 2);
    assert_eq!(cache.len(), 2);
    assert_eq!(render(&first), render(&second));
}

#[test]
fn test_invalid_pattern_fails_the_load() {
    let dir = admitted_workbook();
    let config = DatasetConfig::new("broken", "Table (");
    let mut workbook = open_workbook(dir.path()).unwrap();
    let mut cache = CleanCache::new();
    assert!(load_tables(workbook.as_mut(), &config, &mut cache).is_err());
}
