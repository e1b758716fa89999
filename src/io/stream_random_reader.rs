use std::io::Read;

use tracing::trace;

use crate::error::ReadError;

use super::{ByteOrder, RandomAccessReader};

/// Default number of bytes pulled from the stream per fill.
pub const DEFAULT_CHUNK_LEN: usize = 2 * 1024;

/// Random access over a forward-only stream.
///
/// Bytes are pulled from the stream in chunks only as far as the highest
/// index requested so far, and kept for later reads. Asking for
/// [`length`](RandomAccessReader::length) drains the whole stream.
pub struct RandomAccessStreamReader<R: Read> {
    inner: R,
    chunk_len: usize,
    buffer: Vec<u8>,
    finished: bool,
    byte_order: ByteOrder,
}

impl<R: Read> RandomAccessStreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_chunk_len(inner, DEFAULT_CHUNK_LEN)
    }

    /// Create a reader that fills its buffer `chunk_len` bytes at a time.
    ///
    /// A zero chunk length is treated as 1.
    pub fn with_chunk_len(inner: R, chunk_len: usize) -> Self {
        Self {
            inner,
            chunk_len: chunk_len.max(1),
            buffer: Vec::new(),
            finished: false,
            byte_order: ByteOrder::BigEndian,
        }
    }

    /// Number of bytes buffered so far.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Buffer until at least `end` bytes are held or the stream ends.
    fn fill_to(&mut self, end: u64) -> Result<(), ReadError> {
        while (self.buffer.len() as u64) < end && !self.finished {
            let before = self.buffer.len();
            let read = (&mut self.inner)
                .take(self.chunk_len as u64)
                .read_to_end(&mut self.buffer)?;
            trace!(offset = before, read, "buffered stream chunk");
            if read < self.chunk_len {
                self.finished = true;
            }
        }
        Ok(())
    }
}

impl<R: Read> RandomAccessReader for RandomAccessStreamReader<R> {
    #[inline]
    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    #[inline]
    fn set_byte_order(&mut self, order: ByteOrder) {
        self.byte_order = order;
    }

    fn length(&mut self) -> Result<u64, ReadError> {
        self.fill_to(u64::MAX)?;
        Ok(self.buffer.len() as u64)
    }

    fn is_valid_index(&mut self, index: u64, count: u64) -> bool {
        let Some(end) = index.checked_add(count) else {
            return false;
        };
        if self.fill_to(end).is_err() {
            return false;
        }
        end <= self.buffer.len() as u64
    }

    fn get_bytes_into(&mut self, index: u64, buf: &mut [u8]) -> Result<(), ReadError> {
        let end = index.checked_add(buf.len() as u64);
        match end {
            Some(end) => self.fill_to(end)?,
            None => self.fill_to(u64::MAX)?,
        }
        match end {
            Some(end) if end <= self.buffer.len() as u64 => {
                buf.copy_from_slice(&self.buffer[index as usize..end as usize]);
                Ok(())
            }
            _ => Err(ReadError::EndOfData {
                index,
                requested: buf.len() as u64,
                available: (self.buffer.len() as u64).saturating_sub(index),
            }),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
