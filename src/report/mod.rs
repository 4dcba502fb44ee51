//! From expanded archive tree to finished spreadsheet.
//!
//! - [`walker`]: enumerate qualifying `folder/file.json` entries
//! - [`scanner`]: extract image keys from one entry's lines
//! - [`model`]: fold entries into the folder-by-file matrix
//! - [`builder`]: render the matrix as an XLSX byte buffer

pub mod builder;
pub mod model;
pub mod scanner;
pub mod walker;

pub use builder::build_workbook;
pub use model::ReportModel;
pub use walker::Entry;
