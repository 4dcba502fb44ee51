//! Error taxonomy for the conversion pipeline.
//!
//! Each stage has its own error type so the orchestrator can tell an
//! unreadable archive apart from a workspace fault or a workbook
//! serialization failure. The binary flattens everything into a single
//! "processing failed" outcome; the variants exist for logging and for
//! library callers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Faults raised while parsing or expanding the inbound ZIP archive.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The byte stream is not a recognizable ZIP archive.
    #[error("not a valid ZIP archive: {0}")]
    Malformed(&'static str),

    /// A member uses a compression method we cannot inflate.
    #[error("unsupported compression method {method} for '{name}'")]
    UnsupportedCompression { name: String, method: u16 },

    /// A member path would land outside the workspace (zip-slip).
    #[error("archive member '{entry}' escapes the workspace")]
    UnsafePath { entry: String },

    /// Reading or writing a member failed.
    #[error("failed to expand '{name}': {source}")]
    Member { name: String, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure to create the per-run workspace directory.
#[derive(Debug, Error)]
#[error("failed to create workspace: {source}")]
pub struct WorkspaceError {
    #[from]
    pub source: io::Error,
}

/// Workbook serialization failure.
#[derive(Debug, Error)]
#[error("failed to build workbook: {0}")]
pub struct BuildError(#[from] pub rust_xlsxwriter::XlsxError);

/// Top-level pipeline error. Any variant aborts the remaining stages;
/// no partial spreadsheet is ever produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("archive expansion failed: {0}")]
    Expand(#[from] ExpandError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("failed to scan '{path}': {source}")]
    Scan { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Build(#[from] BuildError),
}
