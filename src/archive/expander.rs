//! Archive Expander: inflate members and materialize the archive tree
//! inside a workspace directory.

use std::io::Read;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use flate2::read::DeflateDecoder;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::ExpandError;
use crate::io::ReadAt;

use super::format::{ArchiveMember, CompressionMethod};
use super::parser::ZipParser;

/// High-level archive expansion over any [`ReadAt`] source.
pub struct Expander<R: ReadAt> {
    parser: ZipParser<R>,
}

impl<R: ReadAt> Expander<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all members of the archive.
    pub async fn members(&self) -> Result<Vec<ArchiveMember>, ExpandError> {
        self.parser.members().await
    }

    /// Read one member's data into memory, inflating it if needed.
    pub async fn read_member(&self, member: &ArchiveMember) -> Result<Vec<u8>, ExpandError> {
        let data_offset = self.parser.data_offset(member).await?;

        let mut raw = vec![0u8; member.compressed_size as usize];
        let n = self
            .parser
            .reader()
            .read_at(data_offset, &mut raw)
            .await
            .map_err(|source| ExpandError::Member {
                name: member.name.clone(),
                source,
            })?;
        if n < raw.len() {
            return Err(ExpandError::Malformed("truncated member data"));
        }

        match member.method {
            CompressionMethod::Stored => Ok(raw),
            CompressionMethod::Deflate => {
                let mut inflated = Vec::with_capacity(member.uncompressed_size as usize);
                DeflateDecoder::new(raw.as_slice())
                    .read_to_end(&mut inflated)
                    .map_err(|source| ExpandError::Member {
                        name: member.name.clone(),
                        source,
                    })?;
                Ok(inflated)
            }
            CompressionMethod::Unknown(method) => Err(ExpandError::UnsupportedCompression {
                name: member.name.clone(),
                method,
            }),
        }
    }

    /// Expand every member under `dest`, preserving the archive's
    /// relative directory structure.
    ///
    /// The first fault aborts the run: a partially expanded tree must
    /// never be treated as a usable workspace. Returns the number of
    /// regular files written.
    pub async fn expand_all(&self, dest: &Path) -> Result<usize, ExpandError> {
        let members = self.parser.members().await?;
        let mut written = 0;

        for member in &members {
            let target = dest.join(sanitize_member_path(&member.name)?);

            if member.is_directory {
                fs::create_dir_all(&target)
                    .await
                    .map_err(|source| ExpandError::Member {
                        name: member.name.clone(),
                        source,
                    })?;
                continue;
            }

            if let Some(parent) = target.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .await
                        .map_err(|source| ExpandError::Member {
                            name: member.name.clone(),
                            source,
                        })?;
                }
            }

            let data = self.read_member(member).await?;

            let mut file = fs::File::create(&target)
                .await
                .map_err(|source| ExpandError::Member {
                    name: member.name.clone(),
                    source,
                })?;
            file.write_all(&data)
                .await
                .map_err(|source| ExpandError::Member {
                    name: member.name.clone(),
                    source,
                })?;
            file.flush()
                .await
                .map_err(|source| ExpandError::Member {
                    name: member.name.clone(),
                    source,
                })?;

            written += 1;
        }

        Ok(written)
    }
}

/// Turn a member name into a safe relative path under the workspace.
///
/// Member names use `/` per the ZIP spec, but some archivers emit `\`.
/// Absolute paths, drive prefixes, `..` traversal, and null bytes are
/// rejected (zip-slip protection).
fn sanitize_member_path(name: &str) -> Result<PathBuf, ExpandError> {
    if name.contains('\0') {
        return Err(ExpandError::UnsafePath {
            entry: name.to_string(),
        });
    }

    let normalized = name.replace('\\', "/");
    let mut out = PathBuf::new();

    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) | Component::ParentDir => {
                return Err(ExpandError::UnsafePath {
                    entry: name.to_string(),
                });
            }
        }
    }

    if out.as_os_str().is_empty() {
        return Err(ExpandError::UnsafePath {
            entry: name.to_string(),
        });
    }

    Ok(out)
}
