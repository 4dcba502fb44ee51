//! End-to-end pipeline orchestration.
//!
//! One run is a single sequential pass: expand the archive into a fresh
//! workspace, walk the qualifying entries, scan and aggregate each one,
//! then render the workbook. Any stage fault aborts the remaining
//! stages; the workspace is torn down on every path and no partial
//! output is ever returned.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::archive::Expander;
use crate::error::PipelineError;
use crate::io::ReadAt;
use crate::report::{build_workbook, scanner, walker, ReportModel};
use crate::workspace::Workspace;

/// Set of file base names to drop before scanning.
///
/// Parsed from a comma-separated string; absent or empty input means
/// "exclude nothing" rather than a fault.
#[derive(Debug, Clone, Default)]
pub struct ExcludeList(HashSet<String>);

impl ExcludeList {
    pub fn parse(raw: Option<&str>) -> Self {
        let names = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        Self(names)
    }

    pub fn contains(&self, file_base: &str) -> bool {
        self.0.contains(file_base)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Run the whole conversion: archive bytes in, workbook bytes out.
pub async fn run<R: ReadAt + 'static>(
    reader: Arc<R>,
    exclude: &ExcludeList,
) -> Result<Vec<u8>, PipelineError> {
    let workspace = Workspace::create()?;
    let result = run_in(reader, exclude, workspace.path()).await;
    workspace.close();

    if let Err(err) = &result {
        log::error!("pipeline run failed: {err}");
    }
    result
}

async fn run_in<R: ReadAt + 'static>(
    reader: Arc<R>,
    exclude: &ExcludeList,
    root: &Path,
) -> Result<Vec<u8>, PipelineError> {
    let expander = Expander::new(reader);
    let expanded = expander.expand_all(root).await?;
    log::debug!("expanded {expanded} archive members");

    let entries = walker::walk_entries(root, exclude).map_err(|source| PipelineError::Scan {
        path: root.to_path_buf(),
        source,
    })?;

    let mut model = ReportModel::new();
    for entry in entries {
        let keys = scanner::scan_keys(&entry.path)
            .await
            .map_err(|source| PipelineError::Scan {
                path: entry.path.clone(),
                source,
            })?;
        log::debug!(
            "{}/{}: {} unique keys",
            entry.folder,
            entry.file_base,
            keys.len()
        );
        model.record(&entry.folder, &entry.file_base, keys);
    }

    Ok(build_workbook(&model)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_exclusion_input_means_exclude_nothing() {
        let list = ExcludeList::parse(None);
        assert!(list.is_empty());
        assert!(!list.contains("anything"));
    }

    #[test]
    fn exclusion_entries_are_trimmed() {
        let list = ExcludeList::parse(Some(" skip , other ,, "));
        assert_eq!(list.len(), 2);
        assert!(list.contains("skip"));
        assert!(list.contains("other"));
        assert!(!list.contains(""));
    }
}
