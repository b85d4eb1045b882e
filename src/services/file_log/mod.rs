//! Per-input log file, written next to the processed archive.
//!
//! Lines look like `2024-05-01 14:03:22 | vpax | INFO | message`. Every entry
//! is mirrored to the global `log` facade as well.

use chrono::{DateTime, Local};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const LOG_SOURCE: &str = "vpax";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARNING",
            LogLevel::Error => "ERROR",
        })
    }
}

/// Appends timestamped lines to one file.
#[derive(Debug, Clone)]
pub struct FileLog {
    path: PathBuf,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.record(LogLevel::Info, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.record(LogLevel::Warn, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.record(LogLevel::Error, message.as_ref());
    }

    /// Append one entry. A log that cannot be written is reported through
    /// the global logger and otherwise ignored.
    pub fn record(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => log::info!("{message}"),
            LogLevel::Warn => log::warn!("{message}"),
            LogLevel::Error => log::error!("{message}"),
        }

        if let Err(e) = self.append(&format_line(Local::now(), level, message)) {
            log::warn!("Failed to append to {}: {e}", self.path.display());
        }
    }

    fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

/// One log line, newline-terminated. Embedded line breaks are flattened so
/// every entry stays on a single line.
pub fn format_line(at: DateTime<Local>, level: LogLevel, message: &str) -> String {
    let flat: String = message
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{} | {} | {} | {}\n",
        at.format("%Y-%m-%d %H:%M:%S"),
        LOG_SOURCE,
        level,
        flat
    )
}

#[cfg(test)]
#[path = "tests/file_log_tests.rs"]
mod tests;
