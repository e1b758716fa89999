use std::io::{self, BufRead, BufReader, Read};

use crate::error::ReadError;

use super::{ByteOrder, SequentialReader};

/// Sequential reader over any [`Read`] source.
///
/// The source is wrapped in a [`BufReader`]; [`available`](SequentialReader::available)
/// reports how many bytes that buffer currently holds.
pub struct StreamReader<R: Read> {
    inner: BufReader<R>,
    position: u64,
    byte_order: ByteOrder,
}

impl<R: Read> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
            position: 0,
            byte_order: ByteOrder::BigEndian,
        }
    }

    /// Unwrap the underlying source. Buffered, unread bytes are lost.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    fn end_of_data(&self, requested: u64, available: u64) -> ReadError {
        ReadError::EndOfData {
            index: self.position,
            requested,
            available,
        }
    }

    /// Consume up to `n` bytes, returning how many were consumed.
    ///
    /// `position` advances as bytes go, so it stays accurate when the
    /// source fails partway.
    fn discard(&mut self, n: u64) -> io::Result<u64> {
        let mut remaining = n;
        while remaining > 0 {
            let buffered = match self.inner.fill_buf() {
                Ok(buf) => buf.len(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buffered == 0 {
                break;
            }
            let step = usize::try_from(remaining).map_or(buffered, |r| r.min(buffered));
            self.inner.consume(step);
            self.position += step as u64;
            remaining -= step as u64;
        }
        Ok(n - remaining)
    }
}

impl<R: Read> SequentialReader for StreamReader<R> {
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
        self.position
    }

    fn get_u8(&mut self) -> Result<u8, ReadError> {
        let mut buf = [0u8; 1];
        self.get_bytes_into(&mut buf)?;
        Ok(buf[0])
    }

    fn get_bytes_into(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    let err = self.end_of_data(buf.len() as u64, filled as u64);
                    self.position += filled as u64;
                    return Err(err);
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.position += filled as u64;
        Ok(())
    }

    /// Reads through a `take` adapter so a bogus length never allocates
    /// more than the stream actually holds.
    fn get_bytes(&mut self, n: usize) -> Result<Vec<u8>, ReadError> {
        let mut buf = Vec::new();
        let read = (&mut self.inner).take(n as u64).read_to_end(&mut buf)?;
        if read < n {
            let err = self.end_of_data(n as u64, read as u64);
            self.position += read as u64;
            return Err(err);
        }
        self.position += read as u64;
        Ok(buf)
    }

    fn skip(&mut self, n: u64) -> Result<(), ReadError> {
        let start = self.position;
        let skipped = self.discard(n)?;
        if skipped < n {
            return Err(ReadError::EndOfData {
                index: start,
                requested: n,
                available: skipped,
            });
        }
        Ok(())
    }

    fn try_skip(&mut self, n: u64) -> bool {
        matches!(self.discard(n), Ok(skipped) if skipped == n)
    }

    fn available(&mut self) -> u64 {
        self.inner
            .fill_buf()
            .map(|buf| buf.len() as u64)
            .unwrap_or(0)
    }
}

// =============================================================================
// Tests
// =============================================================================
