//! CSV output for extracted measures.

mod writer;

pub use writer::{write_measures_csv, CSV_HEADER};

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
