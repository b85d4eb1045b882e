//! Long-running watch mode.

use super::resolve_folder;
use crate::services::config::ExtractorConfig;
use crate::services::pipeline::Pipeline;
use crate::services::watcher::{watch_folder, StopHandle, WatchStats};
use anyhow::Result;
use std::path::Path;

/// Watch `path` (or the working directory) until `stop` fires.
///
/// When `initial_scan` is set, files already in the folder are run through
/// the pipeline first so their outputs are current before watching starts.
pub fn watch_cmd(
    path: Option<&Path>,
    config: ExtractorConfig,
    replace: bool,
    initial_scan: bool,
    stop: &StopHandle,
) -> Result<WatchStats> {
    let folder = resolve_folder(path)?;
    let pipeline = Pipeline::new(config, replace);

    if initial_scan {
        let summary = pipeline.process_folder(&folder)?;
        log::info!(
            "Initial scan: {} extracted, {} failed, {} up to date",
            summary.succeeded(),
            summary.failed(),
            summary.skipped.len()
        );
    }

    Ok(watch_folder(&folder, &pipeline, stop)?)
}
