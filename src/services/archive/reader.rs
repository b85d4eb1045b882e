use super::types::{entry_base_name, strip_bom, MetadataEntry};
use crate::services::config::ArchiveLimits;
use crate::types::{ExtractError, ExtractResult};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use zip::ZipArchive;

/// Upper bound on the buffer reserved from an entry's declared size.
const INITIAL_READ_CAPACITY: u64 = 1024 * 1024;

/// An open VPAX package.
///
/// The underlying file handle lives exactly as long as this value; dropping
/// it closes the archive.
pub struct VpaxArchive {
    path: PathBuf,
    modified: Option<SystemTime>,
    archive: ZipArchive<BufReader<File>>,
    limits: ArchiveLimits,
}

impl VpaxArchive {
    /// Open `path` as a zip archive, enforcing the entry-count guard.
    pub fn open(path: &Path, limits: ArchiveLimits) -> ExtractResult<Self> {
        let open_err = |reason: String| ExtractError::ArchiveOpen {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| open_err(format!("failed to open file: {e}")))?;
        let modified = fs::metadata(path).and_then(|m| m.modified()).ok();

        let archive = ZipArchive::new(BufReader::new(file))
            .map_err(|e| open_err(format!("invalid or corrupt zip: {e}")))?;

        if archive.len() > limits.max_entries {
            return Err(open_err(format!(
                "archive has too many entries: {} (limit: {})",
                archive.len(),
                limits.max_entries
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            modified,
            archive,
            limits,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.archive.file_names()
    }

    /// Resolve the first candidate present in the archive.
    ///
    /// Candidates are probed in order. For each one an entry whose full name
    /// matches wins over an entry that only matches by base name; names are
    /// compared case-insensitively.
    pub fn find_entry(&self, candidates: &[String]) -> Option<String> {
        for candidate in candidates {
            if let Some(name) = self
                .entry_names()
                .find(|name| name.eq_ignore_ascii_case(candidate))
            {
                return Some(name.to_string());
            }

            let mut nested: Vec<&str> = self
                .entry_names()
                .filter(|name| entry_base_name(name).eq_ignore_ascii_case(candidate))
                .collect();
            // Shallowest first, then lexical, so the pick does not depend on
            // central directory order.
            nested.sort_by_key(|name| (name.matches(['/', '\\']).count(), *name));
            if let Some(name) = nested.first() {
                return Some((*name).to_string());
            }
        }
        None
    }

    /// Read one entry as UTF-8 text, enforcing the metadata size guard.
    pub fn read_entry_text(&mut self, name: &str) -> ExtractResult<String> {
        let path = self.path.clone();
        let limit = self.limits.max_metadata_bytes;

        let entry = self
            .archive
            .by_name(name)
            .map_err(|e| ExtractError::ArchiveOpen {
                path: path.clone(),
                reason: format!("failed to read entry '{name}': {e}"),
            })?;

        if entry.size() > limit {
            return Err(ExtractError::ArchiveOpen {
                path,
                reason: format!(
                    "entry '{name}' is too large: {} bytes (limit: {limit} bytes)",
                    entry.size()
                ),
            });
        }

        let mut bytes = Vec::with_capacity(entry.size().min(INITIAL_READ_CAPACITY) as usize);
        // The declared size can lie; never read past the limit.
        entry
            .take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|e| ExtractError::ArchiveOpen {
                path: path.clone(),
                reason: format!("failed to decompress entry '{name}': {e}"),
            })?;

        if bytes.len() as u64 > limit {
            return Err(ExtractError::ArchiveOpen {
                path,
                reason: format!("entry '{name}' exceeds {limit} bytes when decompressed"),
            });
        }

        let text = String::from_utf8(bytes).map_err(|e| ExtractError::MalformedMetadata {
            entry: name.to_string(),
            detail: format!(
                "not valid UTF-8 at byte offset {}",
                e.utf8_error().valid_up_to()
            ),
        })?;

        Ok(strip_bom(text))
    }

    /// Locate and read the model metadata document.
    pub fn read_metadata(&mut self, candidates: &[String]) -> ExtractResult<MetadataEntry> {
        let name = self
            .find_entry(candidates)
            .ok_or_else(|| ExtractError::MissingMetadata {
                path: self.path.clone(),
                candidates: candidates.to_vec(),
            })?;

        log::debug!("Reading '{}' from {}", name, self.path.display());
        let text = self.read_entry_text(&name)?;
        Ok(MetadataEntry { name, text })
    }
}

/// Open `path`, read its metadata document and close the archive again.
pub fn read_metadata_document(
    path: &Path,
    candidates: &[String],
    limits: ArchiveLimits,
) -> ExtractResult<MetadataEntry> {
    let mut archive = VpaxArchive::open(path, limits)?;
    archive.read_metadata(candidates)
}
