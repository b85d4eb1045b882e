use serde::Deserialize;

/// One measure, flattened for CSV output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureRecord {
    pub table: String,
    pub measure: String,
    pub expression: String,
    pub description: String,
    pub format_string: String,
    pub display_folder: String,
}

/// `DaxVpaView.json` as written by VPAX producers.
///
/// Only the fields this tool reads are modelled; everything else in the
/// document is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DaxVpaView {
    #[serde(default)]
    pub tables: Option<Vec<VpaTable>>,
    #[serde(default)]
    pub measures: Option<Vec<VpaMeasure>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct VpaTable {
    #[serde(default)]
    pub table_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct VpaMeasure {
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub measure_name: Option<String>,
    #[serde(default)]
    pub measure_expression: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub format_string: Option<String>,
    #[serde(default)]
    pub display_folder: Option<String>,
}

impl VpaMeasure {
    pub(crate) fn to_record(&self) -> MeasureRecord {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        MeasureRecord {
            table: text(&self.table_name),
            measure: text(&self.measure_name),
            expression: text(&self.measure_expression),
            description: text(&self.description),
            format_string: text(&self.format_string),
            display_folder: text(&self.display_folder),
        }
    }
}
