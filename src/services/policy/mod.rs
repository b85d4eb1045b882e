//! Decides whether an input file needs (re)processing.
//!
//! There is no state store: the decision is recomputed from the input and
//! output file metadata every time it is asked.

use crate::services::config::ExtractorConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Sibling output files of one input: same directory, same base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub csv: PathBuf,
    pub log: PathBuf,
}

impl OutputPaths {
    pub fn for_input(input: &Path, config: &ExtractorConfig) -> Self {
        Self {
            csv: input.with_extension(&config.csv_extension),
            log: input.with_extension(&config.log_extension),
        }
    }
}

/// Why a file is or is not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessDecision {
    /// `replace` was requested.
    Replace,
    /// No output CSV exists yet.
    NoOutput,
    /// The input changed after the output was written.
    InputNewer,
    /// The output is at least as new as the input.
    UpToDate,
}

impl ProcessDecision {
    pub fn should_process(self) -> bool {
        !matches!(self, ProcessDecision::UpToDate)
    }
}

/// Decide from two metadata reads whether `input` must be processed into
/// `output_csv`.
///
/// If the input's mtime cannot be read the file is processed anyway, so the
/// pipeline reports the underlying error instead of the file being skipped
/// silently.
pub fn decide(input: &Path, output_csv: &Path, replace: bool) -> ProcessDecision {
    if replace {
        return ProcessDecision::Replace;
    }

    let Some(output_mtime) = modified(output_csv) else {
        return ProcessDecision::NoOutput;
    };

    match modified(input) {
        Some(input_mtime) if input_mtime <= output_mtime => ProcessDecision::UpToDate,
        _ => ProcessDecision::InputNewer,
    }
}

pub fn should_process(input: &Path, output_csv: &Path, replace: bool) -> bool {
    decide(input, output_csv, replace).should_process()
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
#[path = "tests/policy_tests.rs"]
mod tests;
