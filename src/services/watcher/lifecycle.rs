//! Watch loop lifecycle.
//!
//! Owns the OS watcher and the debouncer, dispatches stabilized files to a
//! handler, and shuts both down when the stop handle fires.

use super::debounce::Debouncer;
use super::{watch_directory, VpaxWatchEvent};
use crate::services::config::ExtractorConfig;
use crate::services::pipeline::Pipeline;
use crate::types::ExtractResult;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Upper bound on how long the loop waits before re-checking the stop flag.
const IDLE_TICK: Duration = Duration::from_millis(100);

/// Cloneable stop signal for a running watch loop.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Counters reported when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchStats {
    /// Change events received for input files.
    pub events: usize,
    /// Handler invocations.
    pub dispatched: usize,
    /// Paths still waiting for their quiet period at shutdown.
    pub cancelled: usize,
}

/// Watch `dir` and call `handler` once per input file after it has been
/// quiet for `config.debounce()`. Blocks until `stop` fires or the OS
/// watcher goes away.
///
/// Only setting up the watch can fail; everything after that is logged.
pub fn run_watch_loop<F>(
    dir: &Path,
    config: &ExtractorConfig,
    stop: &StopHandle,
    mut handler: F,
) -> ExtractResult<WatchStats>
where
    F: FnMut(&Path),
{
    let (watcher, rx) = watch_directory(dir, config)?;
    let mut debouncer = Debouncer::new(config.debounce());
    let mut stats = WatchStats::default();

    log::info!(
        "Watching {} for .{} files (quiet period {} ms)",
        dir.display(),
        config.extension,
        config.debounce_ms
    );

    while !stop.is_stopped() {
        let timeout = debouncer
            .next_deadline()
            .map_or(IDLE_TICK, |deadline| {
                deadline
                    .saturating_duration_since(Instant::now())
                    .min(IDLE_TICK)
            });

        match rx.recv_timeout(timeout) {
            Ok(event) => {
                apply(event, &mut debouncer, &mut stats);
                while let Ok(event) = rx.try_recv() {
                    apply(event, &mut debouncer, &mut stats);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("Watcher channel closed, stopping");
                break;
            }
        }

        debouncer.arm(Instant::now());
        for path in debouncer.take_due(Instant::now()) {
            if path.is_file() {
                handler(&path);
                stats.dispatched += 1;
            } else {
                log::debug!("{} vanished before processing", path.display());
            }
            debouncer.finish(&path);
        }
    }

    stats.cancelled = debouncer.cancel_all();
    drop(watcher);
    log::info!(
        "Stopped watching {} ({} events, {} runs, {} pending cancelled)",
        dir.display(),
        stats.events,
        stats.dispatched,
        stats.cancelled
    );
    Ok(stats)
}

fn apply(event: VpaxWatchEvent, debouncer: &mut Debouncer, stats: &mut WatchStats) {
    match event {
        VpaxWatchEvent::Changed(path) => {
            log::debug!("Change detected: {}", path.display());
            stats.events += 1;
            debouncer.record_event(path);
        }
        VpaxWatchEvent::Removed(path) => {
            if debouncer.cancel(&path) {
                log::debug!("Cancelled pending run for removed {}", path.display());
            }
        }
        VpaxWatchEvent::Error(e) => log::warn!("Watcher error: {e}"),
    }
}

/// Watch `dir` and feed every stabilized input file through `pipeline`.
///
/// Outcomes are reported by the pipeline's per-file log, which is mirrored
/// to the console.
pub fn watch_folder(dir: &Path, pipeline: &Pipeline, stop: &StopHandle) -> ExtractResult<WatchStats> {
    run_watch_loop(dir, pipeline.config(), stop, |path| {
        pipeline.process_file(path);
    })
}

#[cfg(test)]
#[path = "tests/lifecycle_tests.rs"]
mod tests;
