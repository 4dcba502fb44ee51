//! The folder-by-file matrix model.

use std::cmp::Ordering;

use indexmap::{IndexMap, IndexSet};

/// Per-sheet mapping from folder label to that folder's key list.
pub type SheetData = IndexMap<String, Vec<String>>;

/// Running aggregation of every (folder, file, keys) triple.
///
/// Folders and sheets keep first-seen insertion order; the final column
/// order is decided at build time by [`ReportModel::sorted_folders`].
#[derive(Debug, Default)]
pub struct ReportModel {
    folders: IndexSet<String>,
    sheets: IndexMap<String, SheetData>,
}

impl ReportModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one scanned entry into the matrix.
    ///
    /// A new folder appends a column; a new file base opens a sheet. If
    /// the same (folder, file) pair recurs, the later key list replaces
    /// the earlier one.
    pub fn record(&mut self, folder: &str, file_base: &str, keys: Vec<String>) {
        self.folders.insert(folder.to_string());
        self.sheets
            .entry(file_base.to_string())
            .or_default()
            .insert(folder.to_string(), keys);
    }

    /// Sheets in first-seen order.
    pub fn sheets(&self) -> &IndexMap<String, SheetData> {
        &self.sheets
    }

    /// Distinct folder labels in first-seen order.
    pub fn folders(&self) -> &IndexSet<String> {
        &self.folders
    }

    /// The full column set in its final, deterministic order.
    pub fn sorted_folders(&self) -> Vec<&str> {
        let mut folders: Vec<&str> = self.folders.iter().map(String::as_str).collect();
        folders.sort_by(|a, b| folder_order(a, b));
        folders
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Column ordering: case-insensitive, with a case-sensitive tiebreak so
/// the order is total and identical across runs and hosts.
fn folder_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
