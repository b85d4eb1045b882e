//! Per-path debounce state machine.
//!
//! ```text
//! Idle ──event──▶ EventPending ──arm──▶ Stabilizing(deadline) ──due──▶ Processing ──finish──▶ Idle
//!                      ▲                       │                           │
//!                      └────────event──────────┘◀──────event (rerun)───────┘
//! ```
//!
//! Idle paths have no entry. A path holds at most one deadline: a new event
//! on a stabilizing path drops its deadline and the next `arm` sets a fresh
//! one, so a file that keeps changing is processed once, after it goes quiet.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    /// An event arrived; no deadline yet.
    EventPending,
    /// Waiting for the file to stay quiet until `deadline`.
    Stabilizing { deadline: Instant },
    /// Handed to the pipeline. `rerun` records events seen meanwhile.
    Processing { rerun: bool },
}

#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    states: HashMap<PathBuf, PathState>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            states: HashMap::new(),
        }
    }

    /// Current state of `path`; `None` means Idle.
    pub fn state(&self, path: &Path) -> Option<PathState> {
        self.states.get(path).copied()
    }

    /// Number of paths that are not Idle.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// A create/modify event was observed for `path`.
    pub fn record_event(&mut self, path: PathBuf) {
        let next = match self.states.get(&path) {
            Some(PathState::Processing { .. }) => PathState::Processing { rerun: true },
            _ => PathState::EventPending,
        };
        self.states.insert(path, next);
    }

    /// Give every pending path a deadline `quiet` after `now`.
    pub fn arm(&mut self, now: Instant) {
        let deadline = now + self.quiet;
        for state in self.states.values_mut() {
            if *state == PathState::EventPending {
                *state = PathState::Stabilizing { deadline };
            }
        }
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.states
            .values()
            .filter_map(|state| match state {
                PathState::Stabilizing { deadline } => Some(*deadline),
                _ => None,
            })
            .min()
    }

    /// Move every path whose deadline has passed to Processing and return
    /// them in path order.
    pub fn take_due(&mut self, now: Instant) -> Vec<PathBuf> {
        let mut due: Vec<PathBuf> = self
            .states
            .iter()
            .filter_map(|(path, state)| match state {
                PathState::Stabilizing { deadline } if *deadline <= now => Some(path.clone()),
                _ => None,
            })
            .collect();
        due.sort();

        for path in &due {
            self.states
                .insert(path.clone(), PathState::Processing { rerun: false });
        }
        due
    }

    /// The pipeline is done with `path`. Returns it to Idle, or back to
    /// EventPending when it changed while being processed.
    pub fn finish(&mut self, path: &Path) {
        match self.states.get(path) {
            Some(PathState::Processing { rerun: true }) => {
                self.states.insert(path.to_path_buf(), PathState::EventPending);
            }
            Some(PathState::Processing { rerun: false }) => {
                self.states.remove(path);
            }
            _ => {}
        }
    }

    /// Drop a pending path, e.g. because the file was deleted. A path that
    /// is being processed is left alone.
    pub fn cancel(&mut self, path: &Path) -> bool {
        match self.states.get(path) {
            Some(PathState::EventPending | PathState::Stabilizing { .. }) => {
                self.states.remove(path);
                true
            }
            _ => false,
        }
    }

    /// Drop every pending deadline. Returns how many paths were pending.
    pub fn cancel_all(&mut self) -> usize {
        let pending = self.len();
        self.states.clear();
        pending
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
