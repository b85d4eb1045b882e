use crate::services::policy::ProcessDecision;
use chrono::{DateTime, Local};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    Success,
    Failed,
}

/// Outcome of one pipeline run over one input file.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub source: PathBuf,
    pub output: PathBuf,
    pub record_count: usize,
    pub status: ExtractionStatus,
    /// Error kind label, set when `status` is `Failed`.
    pub error_kind: Option<&'static str>,
    pub error: Option<String>,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl ExtractionResult {
    pub fn is_success(&self) -> bool {
        self.status == ExtractionStatus::Success
    }
}

/// What happened to a candidate file.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// The policy decided the existing output is current.
    Skipped {
        source: PathBuf,
        decision: ProcessDecision,
    },
    Processed(ExtractionResult),
}

impl FileOutcome {
    pub fn result(&self) -> Option<&ExtractionResult> {
        match self {
            FileOutcome::Skipped { .. } => None,
            FileOutcome::Processed(result) => Some(result),
        }
    }
}

/// Totals of a folder run.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub results: Vec<ExtractionResult>,
    pub skipped: Vec<PathBuf>,
}

impl ScanSummary {
    pub fn push(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Skipped { source, .. } => self.skipped.push(source),
            FileOutcome::Processed(result) => self.results.push(result),
        }
    }

    pub fn processed(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.processed() - self.succeeded()
    }

    pub fn total_records(&self) -> usize {
        self.results.iter().map(|r| r.record_count).sum()
    }
}
