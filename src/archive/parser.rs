//! Low-level ZIP archive parser.
//!
//! Reads ZIP structures from any source implementing [`ReadAt`]. The
//! archive is parsed from the end: find the EOCD, promote to ZIP64 when
//! the EOCD is saturated, then walk the Central Directory to list every
//! member. Member data offsets are resolved lazily through the Local
//! File Header, whose variable-length fields may differ from the
//! Central Directory copy.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::error::ExpandError;
use crate::io::ReadAt;

use super::format::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
///
/// Limits the search window when the EOCD is not at the very end.
const MAX_COMMENT_SIZE: u64 = 65535;

/// Low-level ZIP file parser, generic over the byte source.
pub struct ZipParser<R: ReadAt> {
    reader: Arc<R>,
    size: u64,
}

impl<R: ReadAt> ZipParser<R> {
    pub fn new(reader: Arc<R>) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// Handles both the common case (no archive comment, EOCD flush with
    /// the end) and commented archives by scanning backwards for the
    /// signature.
    pub async fn find_eocd(&self) -> Result<(EndOfCentralDirectory, u64), ExpandError> {
        // Fast path: no comment, EOCD sits at the tail.
        if self.size >= EndOfCentralDirectory::SIZE as u64 {
            let offset = self.size - EndOfCentralDirectory::SIZE as u64;
            let mut buf = vec![0u8; EndOfCentralDirectory::SIZE];
            self.reader.read_at(offset, &mut buf).await?;

            if &buf[0..4] == EndOfCentralDirectory::SIGNATURE && &buf[20..22] == b"\x00\x00" {
                let eocd = EndOfCentralDirectory::from_bytes(&buf)?;
                return Ok((eocd, offset));
            }
        }

        // The EOCD sits earlier when the archive carries a comment.
        let search_size = (MAX_COMMENT_SIZE + EndOfCentralDirectory::SIZE as u64).min(self.size);
        let search_start = self.size - search_size;

        let mut buf = vec![0u8; search_size as usize];
        self.reader.read_at(search_start, &mut buf).await?;

        for i in (0..buf.len().saturating_sub(EndOfCentralDirectory::SIZE)).rev() {
            if &buf[i..i + 4] == EndOfCentralDirectory::SIGNATURE {
                // Candidate: the comment length field must account for
                // every byte after the record.
                let comment_len = u16::from_le_bytes([buf[i + 20], buf[i + 21]]) as usize;

                if comment_len == buf.len() - i - EndOfCentralDirectory::SIZE {
                    let eocd = EndOfCentralDirectory::from_bytes(
                        &buf[i..i + EndOfCentralDirectory::SIZE],
                    )?;
                    return Ok((eocd, search_start + i as u64));
                }
            }
        }

        Err(ExpandError::Malformed("no End of Central Directory"))
    }

    /// Read the ZIP64 EOCD via its locator, which sits immediately
    /// before the regular EOCD.
    async fn read_zip64_eocd(&self, eocd_offset: u64) -> Result<Zip64Eocd, ExpandError> {
        if eocd_offset < Zip64Locator::SIZE as u64 {
            return Err(ExpandError::Malformed("invalid ZIP64 locator"));
        }
        let locator_offset = eocd_offset - Zip64Locator::SIZE as u64;
        let mut locator_buf = vec![0u8; Zip64Locator::SIZE];
        self.reader.read_at(locator_offset, &mut locator_buf).await?;

        let locator = Zip64Locator::from_bytes(&locator_buf)?;

        let mut eocd64_buf = vec![0u8; Zip64Eocd::MIN_SIZE];
        self.reader
            .read_at(locator.eocd64_offset, &mut eocd64_buf)
            .await?;

        Zip64Eocd::from_bytes(&eocd64_buf)
    }

    /// List every member recorded in the Central Directory.
    pub async fn members(&self) -> Result<Vec<ArchiveMember>, ExpandError> {
        let (eocd, eocd_offset) = self.find_eocd().await?;

        let (cd_offset, cd_size, total_entries) = if eocd.is_zip64() {
            let eocd64 = self.read_zip64_eocd(eocd_offset).await?;
            (eocd64.cd_offset, eocd64.cd_size, eocd64.total_entries)
        } else {
            (
                eocd.cd_offset as u64,
                eocd.cd_size as u64,
                eocd.total_entries as u64,
            )
        };

        // One read for the whole Central Directory.
        let mut cd_data = vec![0u8; cd_size as usize];
        let n = self.reader.read_at(cd_offset, &mut cd_data).await?;
        if n < cd_size as usize {
            return Err(ExpandError::Malformed("truncated Central Directory"));
        }

        let mut members = Vec::with_capacity(total_entries as usize);
        let mut cursor = Cursor::new(&cd_data);

        for _ in 0..total_entries {
            members.push(parse_cdfh(&mut cursor)?);
        }

        Ok(members)
    }

    /// Resolve where a member's data begins.
    ///
    /// The Local File Header carries its own filename and extra field,
    /// which may differ in length from the Central Directory entry, so
    /// the data offset cannot be derived from the CDFH alone.
    pub async fn data_offset(&self, member: &ArchiveMember) -> Result<u64, ExpandError> {
        let mut lfh_buf = vec![0u8; LFH_SIZE];
        self.reader.read_at(member.lfh_offset, &mut lfh_buf).await?;

        if &lfh_buf[0..4] != LFH_SIGNATURE {
            return Err(ExpandError::Malformed("invalid Local File Header"));
        }

        let mut cursor = Cursor::new(&lfh_buf);
        cursor.set_position(26); // filename length field

        let file_name_length = cursor.read_u16::<LittleEndian>()? as u64;
        let extra_field_length = cursor.read_u16::<LittleEndian>()? as u64;

        Ok(member.lfh_offset + LFH_SIZE as u64 + file_name_length + extra_field_length)
    }

    pub fn reader(&self) -> &Arc<R> {
        &self.reader
    }
}

/// Parse one Central Directory File Header, leaving the cursor at the
/// start of the next record.
fn parse_cdfh(cursor: &mut Cursor<&Vec<u8>>) -> Result<ArchiveMember, ExpandError> {
    let mut sig = [0u8; 4];
    cursor.read_exact(&mut sig)?;
    if sig != CDFH_SIGNATURE {
        return Err(ExpandError::Malformed("invalid Central Directory header"));
    }

    let _version_made_by = cursor.read_u16::<LittleEndian>()?;
    let _version_needed = cursor.read_u16::<LittleEndian>()?;
    let _flags = cursor.read_u16::<LittleEndian>()?;
    let method = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_time = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_date = cursor.read_u16::<LittleEndian>()?;
    let _crc32 = cursor.read_u32::<LittleEndian>()?;
    let mut compressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let mut uncompressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let file_name_length = cursor.read_u16::<LittleEndian>()?;
    let extra_field_length = cursor.read_u16::<LittleEndian>()?;
    let file_comment_length = cursor.read_u16::<LittleEndian>()?;
    let _disk_number_start = cursor.read_u16::<LittleEndian>()?;
    let _internal_attrs = cursor.read_u16::<LittleEndian>()?;
    let _external_attrs = cursor.read_u32::<LittleEndian>()?;
    let mut lfh_offset = cursor.read_u32::<LittleEndian>()? as u64;

    let mut file_name_bytes = vec![0u8; file_name_length as usize];
    cursor.read_exact(&mut file_name_bytes)?;
    // Lossy conversion keeps non-UTF8 member names from aborting the run
    let name = String::from_utf8_lossy(&file_name_bytes).to_string();

    let is_directory = name.ends_with('/');

    // ZIP64 extended information lives in extra field 0x0001; a field is
    // present only when the corresponding header value is saturated.
    let extra_field_end = cursor.position() + extra_field_length as u64;

    while cursor.position() + 4 <= extra_field_end {
        let header_id = cursor.read_u16::<LittleEndian>()?;
        let field_size = cursor.read_u16::<LittleEndian>()?;

        if header_id == 0x0001 {
            if uncompressed_size == 0xFFFFFFFF && cursor.position() + 8 <= extra_field_end {
                uncompressed_size = cursor.read_u64::<LittleEndian>()?;
            }
            if compressed_size == 0xFFFFFFFF && cursor.position() + 8 <= extra_field_end {
                compressed_size = cursor.read_u64::<LittleEndian>()?;
            }
            if lfh_offset == 0xFFFFFFFF && cursor.position() + 8 <= extra_field_end {
                lfh_offset = cursor.read_u64::<LittleEndian>()?;
            }
            let remaining = extra_field_end.saturating_sub(cursor.position());
            cursor.set_position(cursor.position() + remaining);
        } else {
            cursor.set_position(cursor.position() + field_size as u64);
        }
    }

    cursor.set_position(extra_field_end);
    cursor.set_position(cursor.position() + file_comment_length as u64);

    Ok(ArchiveMember {
        name,
        method: CompressionMethod::from_u16(method),
        compressed_size,
        uncompressed_size,
        lfh_offset,
        is_directory,
    })
}
