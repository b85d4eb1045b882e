#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Write `dir/name` as a VPAX archive holding `view_json` as its
/// `DaxVpaView.json` entry (BOM-prefixed).
pub fn write_vpax(dir: &Path, name: &str, view_json: &str) -> PathBuf {
    let path = dir.join(name);
    let file = fs::File::create(&path).expect("create vpax");
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    writer.start_file("DaxModel.json", options).unwrap();
    writer.write_all(b"{\"ModelName\":\"Test\"}").unwrap();
    writer.start_file("DaxVpaView.json", options).unwrap();
    writer.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
    writer.write_all(view_json.as_bytes()).unwrap();
    writer.finish().unwrap();
    path
}

/// A view with `count` measures spread over two tables.
pub fn view_with_measures(count: usize) -> String {
    let measures: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "TableName": if i % 2 == 0 { "Sales" } else { "Budget" },
                "MeasureName": format!("Measure {i}"),
                "MeasureExpression": format!("SUM(T[C{i}])"),
                "FormatString": "0",
            })
        })
        .collect();
    serde_json::json!({
        "Tables": [{ "TableName": "Sales" }, { "TableName": "Budget" }],
        "Measures": measures,
    })
    .to_string()
}

/// Parse a CSV produced by the extractor into header + rows.
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .expect("open csv");
    let header = reader
        .headers()
        .expect("csv header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("csv row").iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}
