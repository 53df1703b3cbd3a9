// src/process/utils.rs

use std::path::Path;

/// Derives the city label from an input path: strip directory components,
/// strip the final extension, return the remainder verbatim.
/// A file name without an extension is returned unchanged.
pub fn city_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
