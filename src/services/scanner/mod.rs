//! One-shot folder enumeration.

use crate::services::config::ExtractorConfig;
use crate::types::{ExtractError, ExtractResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Fail unless `path` exists and is a directory.
pub fn ensure_directory(path: &Path) -> ExtractResult<()> {
    if !path.exists() {
        return Err(ExtractError::filesystem(path, "directory does not exist"));
    }
    if !path.is_dir() {
        return Err(ExtractError::filesystem(path, "not a directory"));
    }
    Ok(())
}

/// List the input files directly inside `dir` (no recursion), sorted by
/// file name so runs are reproducible.
pub fn scan_input_files(dir: &Path, config: &ExtractorConfig) -> ExtractResult<Vec<PathBuf>> {
    ensure_directory(dir)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(ExtractError::filesystem(dir, e));
            }
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        if entry.file_type().is_file() && config.is_input_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
