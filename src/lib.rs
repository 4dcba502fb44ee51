//! # imgkeys
//!
//! Cross-tabulate CMS image keys from zipped JSON exports into an XLSX
//! report.
//!
//! An uploaded archive holds per-folder JSON exports
//! (`<folder>/<file>.json`). Each file is scanned line by line for
//! double-quoted `img-prod-cms` image URLs; the final path segment of
//! every match, query string stripped, is that file's set of image keys.
//! Keys are aggregated into a matrix keyed by (folder, file) and
//! rendered as one spreadsheet: a worksheet per file, a pair of columns
//! per folder under a merged two-tier header.
//!
//! The pipeline is transport-agnostic: the inbound side is any
//! [`ReadAt`] byte source (local file, in-memory upload body), the
//! outbound side is an XLSX byte buffer.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use imgkeys::{pipeline, ExcludeList, MemoryReader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let archive: Vec<u8> = std::fs::read("export.zip")?;
//!     let exclude = ExcludeList::parse(Some("draft, tmp"));
//!
//!     let xlsx = pipeline::run(Arc::new(MemoryReader::new(archive)), &exclude).await?;
//!     std::fs::write("report.xlsx", xlsx)?;
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod cli;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod report;
pub mod workspace;

pub use archive::{ArchiveMember, Expander, ZipParser};
pub use cli::Cli;
pub use error::{BuildError, ExpandError, PipelineError, WorkspaceError};
pub use io::{LocalFileReader, MemoryReader, ReadAt};
pub use pipeline::ExcludeList;
pub use report::ReportModel;
pub use workspace::Workspace;
