use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Entry name VPAX producers use for the flattened model view.
pub const DAX_VPA_VIEW_ENTRY: &str = "DaxVpaView.json";

/// Size guards applied while reading an archive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveLimits {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_max_metadata_bytes")]
    pub max_metadata_bytes: u64,
}

impl Default for ArchiveLimits {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            max_metadata_bytes: default_max_metadata_bytes(),
        }
    }
}

/// Tunables for scanning, extraction and watching.
///
/// Every field has a default, so a partial JSON file (or none at all) is valid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Input file extension, compared case-insensitively, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Archive entries probed in order for the model metadata document.
    #[serde(default = "default_metadata_entries")]
    pub metadata_entries: Vec<String>,
    /// Quiet period before a changed file is processed in watch mode.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub limits: ArchiveLimits,
    #[serde(default = "default_csv_extension")]
    pub csv_extension: String,
    #[serde(default = "default_log_extension")]
    pub log_extension: String,
}

fn default_extension() -> String {
    "vpax".to_string()
}
fn default_metadata_entries() -> Vec<String> {
    vec![DAX_VPA_VIEW_ENTRY.to_string()]
}
fn default_debounce_ms() -> u64 {
    500
}
fn default_max_entries() -> usize {
    10_000
}
fn default_max_metadata_bytes() -> u64 {
    256 * 1024 * 1024
}
fn default_csv_extension() -> String {
    "csv".to_string()
}
fn default_log_extension() -> String {
    "log".to_string()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            metadata_entries: default_metadata_entries(),
            debounce_ms: default_debounce_ms(),
            limits: ArchiveLimits::default(),
            csv_extension: default_csv_extension(),
            log_extension: default_log_extension(),
        }
    }
}

impl ExtractorConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Whether `path` carries the configured input extension.
    pub fn is_input_file(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}
