//! Extractor configuration.
//!
//! Settings are read from an optional JSON file. Absent fields fall back to
//! their defaults; an absent file yields `ExtractorConfig::default()`.

pub mod models;

pub use models::*;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Load the configuration from `path`, or the defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<ExtractorConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(ExtractorConfig::default());
    };

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: ExtractorConfig =
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    validate(&config)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn validate(config: &ExtractorConfig) -> Result<(), ConfigError> {
    if config.extension.trim().is_empty() {
        return Err(ConfigError::Invalid("extension must not be empty".into()));
    }
    if config.metadata_entries.is_empty() {
        return Err(ConfigError::Invalid(
            "metadata_entries must name at least one entry".into(),
        ));
    }
    if config.limits.max_entries == 0 || config.limits.max_metadata_bytes == 0 {
        return Err(ConfigError::Invalid(
            "archive limits must be greater than zero".into(),
        ));
    }
    let input = config.extension.to_ascii_lowercase();
    for output in [&config.csv_extension, &config.log_extension] {
        if output.to_ascii_lowercase() == input {
            return Err(ConfigError::Invalid(format!(
                "output extension '{output}' collides with the input extension"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
