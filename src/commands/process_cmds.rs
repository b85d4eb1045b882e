//! One-shot processing of a folder.

use super::resolve_folder;
use crate::services::config::ExtractorConfig;
use crate::services::pipeline::{Pipeline, ScanSummary};
use anyhow::Result;
use std::path::Path;

/// Extract every input file in `path` (or the working directory).
///
/// Returns `Err` only when the folder itself is unusable. Per-file failures
/// are already reported through each file's log.
pub fn process_cmd(path: Option<&Path>, config: ExtractorConfig, replace: bool) -> Result<ScanSummary> {
    let folder = resolve_folder(path)?;
    let pipeline = Pipeline::new(config, replace);
    Ok(pipeline.process_folder(&folder)?)
}
