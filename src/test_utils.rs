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

/// Helper: write a zip with the given entries to `dir/name`.
pub fn create_test_zip(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let zip_path = dir.join(name);
    let file = fs::File::create(&zip_path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (entry_name, content) in files {
        writer.start_file(entry_name.to_string(), options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
    zip_path
}

/// Helper: a VPAX archive whose `DaxVpaView.json` holds `json`, prefixed
/// with a UTF-8 BOM the way real producers write it.
pub fn create_test_vpax(dir: &Path, name: &str, json: &str) -> PathBuf {
    let mut content = vec![0xEF, 0xBB, 0xBF];
    content.extend_from_slice(json.as_bytes());
    create_test_zip(
        dir,
        name,
        &[
            ("[Content_Types].xml", b"<Types/>"),
            ("DaxModel.json", b"{}"),
            ("DaxVpaView.json", &content),
        ],
    )
}

/// A two-table model in the `DaxVpaView.json` layout.
pub const SAMPLE_VIEW_JSON: &str = r##"{
  "Tables": [
    { "TableName": "Sales", "TableExpression": null },
    { "TableName": "Date" }
  ],
  "Measures": [
    {
      "TableName": "Sales",
      "MeasureName": "Total Sales",
      "FullMeasureExpression": "Total Sales := SUM(Sales[Amount])",
      "MeasureExpression": "SUM(Sales[Amount])",
      "DisplayFolder": "Revenue",
      "Description": "Sum of amounts, net",
      "FormatString": "#,0.00"
    },
    {
      "TableName": "Sales",
      "MeasureName": "Orders",
      "MeasureExpression": "COUNTROWS(Sales)"
    },
    {
      "TableName": "Date",
      "MeasureName": "Days",
      "MeasureExpression": "COUNTROWS('Date')",
      "Description": null
    }
  ]
}"##;
