use super::types::{DaxVpaView, MeasureRecord, VpaMeasure};
use crate::services::archive::MetadataEntry;
use crate::types::{ExtractError, ExtractResult};
use std::collections::HashMap;

/// Characters of context shown on each side of a JSON parse error.
const SNIPPET_RADIUS: usize = 24;

/// A parsed model metadata document.
///
/// Validation happens once in [`parse_metadata`]; iterating the records
/// afterwards cannot fail.
#[derive(Debug, Clone)]
pub struct ModelMetadataDocument {
    measures: Vec<VpaMeasure>,
    table_order: Vec<String>,
    /// Measure indices per entry of `table_order`, in document order.
    groups: Vec<Vec<usize>>,
}

impl ModelMetadataDocument {
    /// Table names in document order: the `Tables` collection first, then
    /// tables that only show up as a measure owner.
    pub fn table_names(&self) -> &[String] {
        &self.table_order
    }

    pub fn measure_count(&self) -> usize {
        self.measures.len()
    }

    /// Measures grouped by table, each group in document order.
    ///
    /// Every call starts a fresh pass over the document.
    pub fn records(&self) -> MeasureRecords<'_> {
        MeasureRecords {
            doc: self,
            group_idx: 0,
            pos: 0,
        }
    }
}

/// Lazy iterator returned by [`ModelMetadataDocument::records`].
pub struct MeasureRecords<'a> {
    doc: &'a ModelMetadataDocument,
    group_idx: usize,
    pos: usize,
}

impl Iterator for MeasureRecords<'_> {
    type Item = MeasureRecord;

    fn next(&mut self) -> Option<MeasureRecord> {
        while let Some(group) = self.doc.groups.get(self.group_idx) {
            if let Some(&index) = group.get(self.pos) {
                self.pos += 1;
                return Some(self.doc.measures[index].to_record());
            }
            self.group_idx += 1;
            self.pos = 0;
        }
        None
    }
}

/// Parse the metadata entry pulled from an archive.
pub fn parse_metadata(entry: &MetadataEntry) -> ExtractResult<ModelMetadataDocument> {
    parse_metadata_str(&entry.name, &entry.text)
}

/// Parse `text` as a `DaxVpaView.json` document. `entry_name` is only used
/// in error messages.
pub fn parse_metadata_str(entry_name: &str, text: &str) -> ExtractResult<ModelMetadataDocument> {
    let view: DaxVpaView = serde_json::from_str(text).map_err(|e| {
        let offset = byte_offset(text, e.line(), e.column());
        ExtractError::MalformedMetadata {
            entry: entry_name.to_string(),
            detail: format!(
                "{e} (byte offset {offset}, near `{}`)",
                snippet_around(text, offset)
            ),
        }
    })?;

    let measures = view.measures.unwrap_or_default();
    for (index, measure) in measures.iter().enumerate() {
        for (field, value) in [
            ("TableName", &measure.table_name),
            ("MeasureName", &measure.measure_name),
        ] {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                return Err(ExtractError::MalformedMetadata {
                    entry: entry_name.to_string(),
                    detail: format!("measure #{index} has no {field}"),
                });
            }
        }
    }

    let mut table_order: Vec<String> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut register = |name: &str| -> usize {
        *positions.entry(name.to_string()).or_insert_with(|| {
            table_order.push(name.to_string());
            table_order.len() - 1
        })
    };

    for name in view
        .tables
        .iter()
        .flatten()
        .filter_map(|t| t.table_name.as_deref())
        .filter(|name| !name.is_empty())
    {
        register(name);
    }

    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (index, measure) in measures.iter().enumerate() {
        // Validated above: every measure has a non-empty table name.
        let Some(table) = measure.table_name.as_deref() else {
            continue;
        };
        let slot = register(table);
        if groups.len() <= slot {
            groups.resize_with(slot + 1, Vec::new);
        }
        groups[slot].push(index);
    }
    groups.resize_with(table_order.len(), Vec::new);

    log::debug!(
        "Parsed '{}': {} tables, {} measures",
        entry_name,
        table_order.len(),
        measures.len()
    );

    Ok(ModelMetadataDocument {
        measures,
        table_order,
        groups,
    })
}

/// Convert serde_json's 1-based line/column into a byte offset into `text`.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}

fn snippet_around(text: &str, offset: usize) -> String {
    let mut start = offset.saturating_sub(SNIPPET_RADIUS);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (offset + SNIPPET_RADIUS).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    text[start..end].escape_debug().to_string()
}
