use super::ReadAt;
use async_trait::async_trait;
use std::io::Result;

/// In-memory archive source.
///
/// This is the inbound interface for transports that receive the archive
/// as a request body rather than a filesystem path, and the entry point
/// for test fixtures.
pub struct MemoryReader {
    data: Vec<u8>,
}

impl MemoryReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl ReadAt for MemoryReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let len = self.data.len() as u64;
        if offset >= len {
            return Ok(0);
        }
        let start = offset as usize;
        let end = (offset + buf.len() as u64).min(len) as usize;
        let n = end - start;
        buf[..n].copy_from_slice(&self.data[start..end]);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
