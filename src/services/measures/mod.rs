//! Measure extraction from the `DaxVpaView.json` document.

mod extractor;
mod types;

pub use extractor::{parse_metadata, parse_metadata_str, MeasureRecords, ModelMetadataDocument};
pub use types::MeasureRecord;

#[cfg(test)]
#[path = "tests/extractor_tests.rs"]
mod tests;
