//! Workspace walker and entry derivation.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::pipeline::ExcludeList;

/// Recognized data-file suffix.
pub const DATA_SUFFIX: &str = ".json";

/// One qualifying extracted file: `folder/<file_base>.json`.
#[derive(Debug, Clone)]
pub struct Entry {
    /// First path segment relative to the workspace root.
    pub folder: String,
    /// Second segment with the data suffix stripped.
    pub file_base: String,
    /// Absolute path of the extracted file.
    pub path: PathBuf,
}

/// Enumerate qualifying entries under the workspace root.
///
/// Qualification is by path shape, decomposed into components rather
/// than split on a host separator: exactly two segments, the second
/// carrying the `.json` suffix. Root-level files and deeper nesting are
/// skipped. Excluded base names are dropped here, before any scanning.
///
/// Entries are yielded in a sorted, host-independent order so repeated
/// runs over identical archives aggregate identically.
pub fn walk_entries(root: &Path, exclude: &ExcludeList) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for item in WalkDir::new(root).sort_by_file_name() {
        let item = item.map_err(io::Error::from)?;
        if !item.file_type().is_file() {
            continue;
        }

        let Ok(rel) = item.path().strip_prefix(root) else {
            continue;
        };

        let segments: Vec<&str> = rel
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect();
        if segments.len() != 2 {
            continue;
        }

        let Some(file_base) = segments[1].strip_suffix(DATA_SUFFIX) else {
            continue;
        };
        if file_base.is_empty() || exclude.contains(file_base) {
            continue;
        }

        entries.push(Entry {
            folder: segments[0].to_string(),
            file_base: file_base.to_string(),
            path: item.path().to_path_buf(),
        });
    }

    Ok(entries)
}
