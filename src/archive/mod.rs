//! ZIP archive parsing and expansion.
//!
//! The inbound archive is parsed back-to-front: the End of Central
//! Directory (EOCD) record at the tail locates the Central Directory,
//! which lists every member without touching the member data. ZIP64
//! archives are handled transparently.
//!
//! ## Components
//!
//! - [`format`]: the on-disk record layouts (EOCD, ZIP64 records, header
//!   signatures) and [`ArchiveMember`]
//! - [`parser`]: binary parsing over any [`ReadAt`](crate::io::ReadAt) source
//! - [`expander`]: member inflation and full expansion into a workspace
//!
//! ## Supported
//!
//! - Standard ZIP (PKZIP APPNOTE 6.3.x compatible) and ZIP64
//! - STORED and DEFLATE members
//!
//! Encrypted members, multi-disk archives, and other compression methods
//! abort the run as an expansion failure; there is no partial-success
//! mode.

mod expander;
mod format;
mod parser;

pub use expander::Expander;
pub use format::{ArchiveMember, CompressionMethod};
pub use parser::ZipParser;
