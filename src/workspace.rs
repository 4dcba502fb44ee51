//! Per-run workspace lifecycle.
//!
//! Every pipeline run expands its archive into a uniquely named
//! temporary directory, so concurrent runs can never see each other's
//! files. Teardown is unconditional: [`Workspace::close`] on the normal
//! path, `Drop` on every early exit (faults, panics, cancelled futures).

use std::path::Path;

use tempfile::TempDir;

use crate::error::WorkspaceError;

/// Exclusively-owned filesystem area holding the expanded archive tree.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace directory for one run.
    pub fn create() -> Result<Self, WorkspaceError> {
        let dir = tempfile::Builder::new().prefix("imgkeys-").tempdir()?;
        log::debug!("workspace created at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Tear the workspace down.
    ///
    /// A teardown failure is logged for operators but never overrides
    /// the already-determined run outcome.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(err) = self.dir.close() {
            log::warn!("workspace teardown failed at {}: {err}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_removes_the_directory() {
        let ws = Workspace::create().unwrap();
        let path = ws.path().to_path_buf();
        assert!(path.is_dir());
        ws.close();
        assert!(!path.exists());
    }

    #[test]
    fn drop_removes_the_directory() {
        let path = {
            let ws = Workspace::create().unwrap();
            ws.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn workspaces_never_collide() {
        let a = Workspace::create().unwrap();
        let b = Workspace::create().unwrap();
        assert_ne!(a.path(), b.path());
    }
}
