use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort the processing of a single VPAX file.
///
/// The pipeline catches these at the per-file boundary, so one bad archive
/// never stops a folder run or the watch loop.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot open archive {path}: {reason}")]
    ArchiveOpen { path: PathBuf, reason: String },
    #[error("no model metadata entry in {path} (looked for: {})", .candidates.join(", "))]
    MissingMetadata {
        path: PathBuf,
        candidates: Vec<String>,
    },
    #[error("malformed metadata in '{entry}': {detail}")]
    MalformedMetadata { entry: String, detail: String },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },
}

impl ExtractError {
    /// Stable label used in per-file log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::ArchiveOpen { .. } => "ArchiveOpenError",
            ExtractError::MissingMetadata { .. } => "MissingMetadataError",
            ExtractError::MalformedMetadata { .. } => "MalformedMetadataError",
            ExtractError::Write { .. } => "WriteError",
            ExtractError::Filesystem { .. } => "FilesystemError",
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ExtractError::Filesystem {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
