mod local;
mod memory;

pub use local::LocalFileReader;
pub use memory::MemoryReader;

use async_trait::async_trait;
use std::io::Result;

/// Trait for random access reading from an archive byte source.
///
/// The pipeline never assumes the archive lives on disk: an HTTP upload
/// body held in memory works just as well as a local file.
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer.
    ///
    /// Fills as much of `buf` as the source allows and returns the number
    /// of bytes read; a short count means the source ended.
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source.
    fn size(&self) -> u64;
}
