use bytes::Bytes;

use crate::error::ReadError;

use super::{ByteOrder, SequentialReader};

/// Sequential reader over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct SequentialByteArrayReader {
    data: Bytes,
    index: usize,
    byte_order: ByteOrder,
}

impl SequentialByteArrayReader {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self::with_start(data, 0)
    }

    /// Start reading at `index` into `data`. Positions are still reported
    /// relative to the start of `data`.
    pub fn with_start(data: impl Into<Bytes>, index: usize) -> Self {
        Self {
            data: data.into(),
            index,
            byte_order: ByteOrder::BigEndian,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.index)
    }

    fn check(&self, n: u64) -> Result<(), ReadError> {
        if n > self.remaining() as u64 {
            return Err(ReadError::EndOfData {
                index: self.index as u64,
                requested: n,
                available: self.remaining() as u64,
            });
        }
        Ok(())
    }
}

impl SequentialReader for SequentialByteArrayReader {
    #[inline]
    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    #[inline]
    fn set_byte_order(&mut self, order: ByteOrder) {
        self.byte_order = order;
    }

    #[inline]
    fn position(&self) -> u64 {
        self.index as u64
    }

    fn get_u8(&mut self) -> Result<u8, ReadError> {
        self.check(1)?;
        let b = self.data[self.index];
        self.index += 1;
        Ok(b)
    }

    fn get_bytes_into(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        self.check(buf.len() as u64)?;
        buf.copy_from_slice(&self.data[self.index..self.index + buf.len()]);
        self.index += buf.len();
        Ok(())
    }

    fn get_bytes(&mut self, n: usize) -> Result<Vec<u8>, ReadError> {
        self.check(n as u64)?;
        let out = self.data[self.index..self.index + n].to_vec();
        self.index += n;
        Ok(out)
    }

    fn skip(&mut self, n: u64) -> Result<(), ReadError> {
        self.check(n)?;
        self.index += n as usize;
        Ok(())
    }

    fn try_skip(&mut self, n: u64) -> bool {
        if n > self.remaining() as u64 {
            self.index = self.data.len();
            return false;
        }
        self.index += n as usize;
        true
    }

    fn available(&mut self) -> u64 {
        self.remaining() as u64
    }
}

// =============================================================================
// Tests
// =============================================================================
