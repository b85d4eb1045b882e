/// The raw model metadata document pulled out of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    /// Entry name as stored in the archive.
    pub name: String,
    /// Entry content decoded as UTF-8, byte-order mark removed.
    pub text: String,
}

const UTF8_BOM: char = '\u{feff}';

/// Strip a leading UTF-8 byte-order mark, which VPAX producers emit.
pub(crate) fn strip_bom(text: String) -> String {
    match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// Final path segment of a zip entry name. Both separators are accepted
/// because some producers write Windows-style names.
pub(crate) fn entry_base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
