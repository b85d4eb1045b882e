//! Read access to VPAX packages.
//!
//! A VPAX file is a plain zip archive; the measures live in a JSON entry
//! (`DaxVpaView.json`). Nothing is extracted to disk.

mod reader;
mod types;

pub use reader::{read_metadata_document, VpaxArchive};
pub use types::MetadataEntry;

#[cfg(test)]
#[path = "tests/reader_tests.rs"]
mod tests;
