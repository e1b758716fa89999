use bytes::Bytes;

use crate::error::ReadError;

use super::{ByteOrder, RandomAccessReader};

/// Random access over an in-memory buffer.
///
/// An optional base offset shifts every index, so a reader can present a
/// TIFF block embedded in a larger buffer as if it started at zero.
#[derive(Debug, Clone)]
pub struct ByteArrayReader {
    data: Bytes,
    base_offset: usize,
    byte_order: ByteOrder,
}

impl ByteArrayReader {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self::with_base_offset(data, 0)
    }

    pub fn with_base_offset(data: impl Into<Bytes>, base_offset: usize) -> Self {
        Self {
            data: data.into(),
            base_offset,
            byte_order: ByteOrder::BigEndian,
        }
    }

    /// Translate a local index into an index into the full buffer.
    #[inline]
    pub fn to_unshifted_offset(&self, index: u64) -> u64 {
        index + self.base_offset as u64
    }

    /// Zero-copy view of `count` bytes at `index`.
    pub fn slice(&mut self, index: u64, count: usize) -> Result<Bytes, ReadError> {
        self.validate_index(index, count as u64)?;
        let start = self.to_unshifted_offset(index) as usize;
        Ok(self.data.slice(start..start + count))
    }

    #[inline]
    fn local_len(&self) -> u64 {
        self.data.len().saturating_sub(self.base_offset) as u64
    }
}

impl RandomAccessReader for ByteArrayReader {
    #[inline]
    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    #[inline]
    fn set_byte_order(&mut self, order: ByteOrder) {
        self.byte_order = order;
    }

    #[inline]
    fn length(&mut self) -> Result<u64, ReadError> {
        Ok(self.local_len())
    }

    #[inline]
    fn is_valid_index(&mut self, index: u64, count: u64) -> bool {
        index
            .checked_add(count)
            .map_or(false, |end| end <= self.local_len())
    }

    fn get_bytes_into(&mut self, index: u64, buf: &mut [u8]) -> Result<(), ReadError> {
        self.validate_index(index, buf.len() as u64)?;
        let start = self.to_unshifted_offset(index) as usize;
        buf.copy_from_slice(&self.data[start..start + buf.len()]);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
