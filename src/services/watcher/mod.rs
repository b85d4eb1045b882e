//! File system watcher for VPAX folders.
//!
//! Uses the `notify` crate (v7, recommended watcher) to observe one
//! directory, non-recursively. Raw events are narrowed to input files and
//! handed to the debounced watch loop in [`lifecycle`].

use crate::services::config::ExtractorConfig;
use crate::services::scanner::ensure_directory;
use crate::types::{ExtractError, ExtractResult};
use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

pub mod debounce;
pub mod lifecycle;

pub use debounce::{Debouncer, PathState};
pub use lifecycle::{run_watch_loop, watch_folder, StopHandle, WatchStats};

/// Events emitted by the folder watcher, already filtered to input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VpaxWatchEvent {
    /// An input file was created, written to, or renamed into place.
    Changed(PathBuf),
    /// An input file was removed or renamed away.
    Removed(PathBuf),
    /// The OS watcher reported an error.
    Error(String),
}

/// Create a watcher on `path`.
///
/// Returns the watcher handle and the receiving end of its event channel.
/// Events are produced on notify's own thread; dropping the handle stops
/// watching and eventually disconnects the channel.
pub fn watch_directory(
    path: &Path,
    config: &ExtractorConfig,
) -> ExtractResult<(RecommendedWatcher, mpsc::Receiver<VpaxWatchEvent>)> {
    ensure_directory(path)?;

    let (tx, rx) = mpsc::channel();
    let filter = config.clone();

    let mut watcher = RecommendedWatcher::new(
        move |result: Result<Event, notify::Error>| match result {
            Ok(event) => {
                for ev in translate_event(event, &filter) {
                    let _ = tx.send(ev);
                }
            }
            Err(e) => {
                let _ = tx.send(VpaxWatchEvent::Error(e.to_string()));
            }
        },
        Config::default().with_poll_interval(Duration::from_millis(500)),
    )
    .map_err(|e| ExtractError::filesystem(path, format!("failed to create watcher: {e}")))?;

    watcher
        .watch(path, RecursiveMode::NonRecursive)
        .map_err(|e| ExtractError::filesystem(path, format!("failed to watch path: {e}")))?;

    Ok((watcher, rx))
}

/// Translate a raw notify Event into watch events for input files.
fn translate_event(event: Event, config: &ExtractorConfig) -> Vec<VpaxWatchEvent> {
    let inputs = |paths: Vec<PathBuf>| -> Vec<PathBuf> {
        paths
            .into_iter()
            .filter(|p| config.is_input_file(p))
            .collect()
    };

    match event.kind {
        EventKind::Create(_) => inputs(event.paths)
            .into_iter()
            .map(VpaxWatchEvent::Changed)
            .collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => inputs(event.paths)
            .into_iter()
            .map(VpaxWatchEvent::Removed)
            .collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            // paths = [from, to]
            let mut results = Vec::new();
            let mut paths = event.paths.into_iter();
            if let Some(from) = paths.next().filter(|p| config.is_input_file(p)) {
                results.push(VpaxWatchEvent::Removed(from));
            }
            if let Some(to) = paths.next().filter(|p| config.is_input_file(p)) {
                results.push(VpaxWatchEvent::Changed(to));
            }
            results
        }
        EventKind::Modify(_) => inputs(event.paths)
            .into_iter()
            .map(VpaxWatchEvent::Changed)
            .collect(),
        EventKind::Remove(_) => inputs(event.paths)
            .into_iter()
            .map(VpaxWatchEvent::Removed)
            .collect(),
        _ => Vec::new(), // Ignore Access, Other, etc.
    }
}

#[cfg(test)]
#[path = "tests/watcher_tests.rs"]
mod tests;
