//! The extraction pipeline.
//!
//! policy → archive → measures → CSV, with one log file per input. Errors
//! from a single file are caught here and never reach the caller, so folder
//! runs and the watch loop keep going.

mod types;

pub use types::{ExtractionResult, ExtractionStatus, FileOutcome, ScanSummary};

use crate::services::archive::read_metadata_document;
use crate::services::config::ExtractorConfig;
use crate::services::csv_export::write_measures_csv;
use crate::services::file_log::FileLog;
use crate::services::measures::parse_metadata;
use crate::services::policy::{decide, OutputPaths, ProcessDecision};
use crate::services::scanner::scan_input_files;
use crate::types::ExtractResult;
use chrono::Local;
use std::path::Path;

/// Runs the extraction for single files or whole folders.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: ExtractorConfig,
    replace: bool,
}

impl Pipeline {
    pub fn new(config: ExtractorConfig, replace: bool) -> Self {
        Self { config, replace }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn replace(&self) -> bool {
        self.replace
    }

    /// Process one input file if the policy says so.
    pub fn process_file(&self, input: &Path) -> FileOutcome {
        let outputs = OutputPaths::for_input(input, &self.config);

        let decision = decide(input, &outputs.csv, self.replace);
        if !decision.should_process() {
            log::info!(
                "Skipping {}: {} is up to date",
                input.display(),
                outputs.csv.display()
            );
            return FileOutcome::Skipped {
                source: input.to_path_buf(),
                decision,
            };
        }

        FileOutcome::Processed(self.run(input, &outputs, decision))
    }

    /// Process every input file directly inside `dir`.
    ///
    /// Only a failure to list `dir` is returned as an error; per-file
    /// failures are recorded in the summary.
    pub fn process_folder(&self, dir: &Path) -> ExtractResult<ScanSummary> {
        let files = scan_input_files(dir, &self.config)?;
        if files.is_empty() {
            log::info!("No {} files found in {}", self.config.extension, dir.display());
        }

        let mut summary = ScanSummary::default();
        for file in files {
            summary.push(self.process_file(&file));
        }

        log::debug!(
            "Folder run finished: {} processed ({} ok, {} failed), {} skipped",
            summary.processed(),
            summary.succeeded(),
            summary.failed(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    fn run(&self, input: &Path, outputs: &OutputPaths, decision: ProcessDecision) -> ExtractionResult {
        let log = FileLog::new(&outputs.log);
        let started_at = Local::now();

        log.info(format!("START - Extracting DAX measures from {}", input.display()));
        match decision {
            ProcessDecision::Replace => log.info("Replacing existing output"),
            ProcessDecision::InputNewer => log.info("Input changed since last extraction"),
            ProcessDecision::NoOutput | ProcessDecision::UpToDate => {}
        }

        let outcome = self.extract(input, outputs, &log);
        let finished_at = Local::now();

        match outcome {
            Ok(record_count) => {
                log.info(format!(
                    "END - Exported {record_count} measures to {}",
                    outputs.csv.display()
                ));
                ExtractionResult {
                    source: input.to_path_buf(),
                    output: outputs.csv.clone(),
                    record_count,
                    status: ExtractionStatus::Success,
                    error_kind: None,
                    error: None,
                    started_at,
                    finished_at,
                }
            }
            Err(e) => {
                log.error(format!("{}: {e}", e.kind()));
                log.error("END - Extraction failed, no CSV written");
                ExtractionResult {
                    source: input.to_path_buf(),
                    output: outputs.csv.clone(),
                    record_count: 0,
                    status: ExtractionStatus::Failed,
                    error_kind: Some(e.kind()),
                    error: Some(e.to_string()),
                    started_at,
                    finished_at,
                }
            }
        }
    }

    fn extract(&self, input: &Path, outputs: &OutputPaths, log: &FileLog) -> ExtractResult<usize> {
        let entry = read_metadata_document(
            input,
            &self.config.metadata_entries,
            self.config.limits,
        )?;
        log.info(format!("Read '{}' from archive", entry.name));

        let document = parse_metadata(&entry)?;
        log.info(format!(
            "Found {} measures across {} tables",
            document.measure_count(),
            document.table_names().len()
        ));

        write_measures_csv(document.records(), &outputs.csv)
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
