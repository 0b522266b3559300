use crate::error::{ChunkError, Result};
use std::io::{self, Read};

/// Bytes held back from every chunk for a future per-chunk header
pub const RESERVED_BYTES: u64 = 400;

/// Chunk size requested when none is given (5 MB)
pub const DEFAULT_CHUNK_SIZE_KB: u64 = 5120;

/// Minimum width of the part counter in chunk file names
pub const MIN_COUNTER_WIDTH: usize = 3;

/// Effective number of payload bytes per chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSize(usize);

impl ChunkSize {
    /// Derive the buffer size from a size in KB, minus [`RESERVED_BYTES`]
    pub fn from_kb(kb: u64) -> Result<Self> {
        let bytes = kb
            .checked_mul(1024)
            .and_then(|b| b.checked_sub(RESERVED_BYTES))
            .filter(|&b| b > 0)
            .and_then(|b| usize::try_from(b).ok())
            .ok_or(ChunkError::InvalidChunkSize(kb))?;
        Ok(Self(bytes))
    }

    /// Use an exact buffer size, bypassing the KB arithmetic
    pub fn from_bytes(bytes: usize) -> Result<Self> {
        if bytes == 0 {
            return Err(ChunkError::InvalidChunkSize(0));
        }
        Ok(Self(bytes))
    }

    pub fn bytes(&self) -> usize {
        self.0
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self((DEFAULT_CHUNK_SIZE_KB * 1024 - RESERVED_BYTES) as usize)
    }
}

/// Number of chunks needed for `data_size` bytes: ceil(data_size / chunk)
pub fn chunk_count(data_size: u64, chunk_size: ChunkSize) -> u64 {
    let chunk = chunk_size.bytes() as u64;
    data_size.div_ceil(chunk)
}

/// Counter width keeping lexicographic part order equal to numeric order
pub fn counter_width(chunk_count: u64) -> usize {
    let digits = chunk_count.max(1).to_string().len();
    digits.max(MIN_COUNTER_WIDTH)
}

/// Replace the contents of `buf` with the next chunk of at most `limit`
/// bytes. Short reads are retried, so fewer than `limit` bytes are
/// returned only at end of stream.
pub fn read_chunk<R: Read>(reader: &mut R, limit: usize, buf: &mut Vec<u8>) -> io::Result<usize> {
    buf.clear();
    reader.take(limit as u64).read_to_end(buf)
}
