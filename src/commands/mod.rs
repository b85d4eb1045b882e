//! Entry points behind the `vpax` subcommands.
//!
//! Each command resolves its folder, builds a [`Pipeline`] and hands off to
//! the services layer. Startup failures surface as `anyhow` errors; per-file
//! failures only show up in the summary and the sibling log files.
//!
//! [`Pipeline`]: crate::services::pipeline::Pipeline

pub mod process_cmds;
pub mod watch_cmds;

use crate::services::scanner::ensure_directory;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the folder argument, defaulting to the working directory.
pub fn resolve_folder(path: Option<&Path>) -> Result<PathBuf> {
    let folder = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    ensure_directory(&folder)?;
    Ok(folder)
}

#[cfg(test)]
#[path = "tests/command_tests.rs"]
mod tests;
