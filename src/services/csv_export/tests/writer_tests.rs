use super::*;
use crate::services::measures::MeasureRecord;
use crate::types::ExtractError;
use std::fs;
use tempfile::TempDir;

fn record(table: &str, measure: &str, expression: &str, description: &str) -> MeasureRecord {
    MeasureRecord {
        table: table.to_string(),
        measure: measure.to_string(),
        expression: expression.to_string(),
        description: description.to_string(),
        format_string: String::new(),
        display_folder: String::new(),
    }
}

fn read_back(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn test_header_and_rows() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("model.csv");
    let records = vec![
        record("Sales", "Total", "SUM(Sales[Amount])", ""),
        record("Sales", "Count", "COUNTROWS(Sales)", "Row count"),
    ];

    let rows = write_measures_csv(records, &out).unwrap();
    assert_eq!(rows, 2);

    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(
        content,
        "table,measure,expression,description,format_string,display_folder\n\
         Sales,Total,SUM(Sales[Amount]),,,\n\
         Sales,Count,COUNTROWS(Sales),Row count,,\n"
    );
}

#[test]
fn test_empty_input_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("empty.csv");

    let rows = write_measures_csv(Vec::new(), &out).unwrap();
    assert_eq!(rows, 0);
    assert_eq!(read_back(&out), vec![CSV_HEADER.map(String::from).to_vec()]);
}

#[test]
fn test_quoting_round_trips() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("quoted.csv");
    let tricky = record(
        "Sales, EU",
        "Margin \"net\"",
        "VAR x = 1\nRETURN\r\n  DIVIDE([a], [b])",
        "Uses \"net\" revenue, excludes tax",
    );

    write_measures_csv(vec![tricky.clone()], &out).unwrap();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("\"Uses \"\"net\"\" revenue, excludes tax\""));

    let rows = read_back(&out);
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        vec![
            tricky.table,
            tricky.measure,
            tricky.expression,
            tricky.description,
            String::new(),
            String::new(),
        ]
    );
}

#[test]
fn test_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("model.csv");
    fs::write(&out, "stale content that is much longer than the new file\n".repeat(10)).unwrap();

    write_measures_csv(vec![record("T", "m", "1", "")], &out).unwrap();
    assert_eq!(read_back(&out).len(), 2);
}

#[test]
fn test_failure_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    // A directory at the target path makes the final rename fail.
    let out = dir.path().join("model.csv");
    fs::create_dir(&out).unwrap();

    let err = write_measures_csv(vec![record("T", "m", "1", "")], &out).unwrap_err();
    assert!(matches!(err, ExtractError::Write { .. }));

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with(".vpax-"))
        .collect();
    assert!(leftovers.is_empty());
    assert!(out.is_dir());
}

#[test]
fn test_missing_directory_is_write_error() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("absent").join("model.csv");

    let err = write_measures_csv(Vec::new(), &out).unwrap_err();
    assert_eq!(err.kind(), "WriteError");
    assert!(!out.exists());
}
