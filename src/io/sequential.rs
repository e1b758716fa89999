//! Forward-only readers.
//!
//! A [`SequentialReader`] consumes bytes from a cursor that only moves
//! forwards. The total length is not known in advance, which makes it the
//! right shape for scanning JPEG streams straight off disk.

use crate::error::ReadError;
use crate::model::{Charset, StringValue};

use super::ByteOrder;

/// Forward-only primitive decoding.
///
/// Implementors supply raw byte access; every multi-byte getter is
/// provided on top of it and honours the current [`ByteOrder`].
pub trait SequentialReader {
    /// Current byte order for multi-byte getters.
    fn byte_order(&self) -> ByteOrder;

    fn set_byte_order(&mut self, order: ByteOrder);

    /// Number of bytes consumed so far. Informational only; there is no seeking back.
    fn position(&self) -> u64;

    fn get_u8(&mut self) -> Result<u8, ReadError>;

    /// Fill `buf` completely or fail with [`ReadError::EndOfData`].
    fn get_bytes_into(&mut self, buf: &mut [u8]) -> Result<(), ReadError>;

    /// Skip exactly `n` bytes, failing if fewer remain.
    fn skip(&mut self, n: u64) -> Result<(), ReadError>;

    /// Skip `n` bytes, returning `false` if the data ran out first.
    fn try_skip(&mut self, n: u64) -> bool;

    /// Best-effort count of bytes that can be read without blocking.
    ///
    /// May be 0 at the end of the stream, and may under-report otherwise.
    fn available(&mut self) -> u64;

    // -------------------------------------------------------------------------
    // Provided getters
    // -------------------------------------------------------------------------

    #[inline]
    fn is_motorola_byte_order(&self) -> bool {
        self.byte_order().is_motorola()
    }

    #[inline]
    fn set_motorola_byte_order(&mut self, motorola: bool) {
        self.set_byte_order(ByteOrder::from_motorola(motorola));
    }

    fn get_i8(&mut self) -> Result<i8, ReadError> {
        Ok(self.get_u8()? as i8)
    }

    /// Read `n` bytes into a new buffer.
    fn get_bytes(&mut self, n: usize) -> Result<Vec<u8>, ReadError> {
        let mut buf = vec![0u8; n];
        self.get_bytes_into(&mut buf)?;
        Ok(buf)
    }

    fn get_u16(&mut self) -> Result<u16, ReadError> {
        let mut buf = [0u8; 2];
        self.get_bytes_into(&mut buf)?;
        Ok(self.byte_order().read_u16(buf))
    }

    fn get_i16(&mut self) -> Result<i16, ReadError> {
        Ok(self.get_u16()? as i16)
    }

    fn get_u24(&mut self) -> Result<u32, ReadError> {
        let mut buf = [0u8; 3];
        self.get_bytes_into(&mut buf)?;
        Ok(self.byte_order().read_u24(buf))
    }

    fn get_u32(&mut self) -> Result<u32, ReadError> {
        let mut buf = [0u8; 4];
        self.get_bytes_into(&mut buf)?;
        Ok(self.byte_order().read_u32(buf))
    }

    fn get_i32(&mut self) -> Result<i32, ReadError> {
        Ok(self.get_u32()? as i32)
    }

    fn get_i64(&mut self) -> Result<i64, ReadError> {
        let mut buf = [0u8; 8];
        self.get_bytes_into(&mut buf)?;
        Ok(self.byte_order().read_u64(buf) as i64)
    }

    fn get_f32(&mut self) -> Result<f32, ReadError> {
        Ok(f32::from_bits(self.get_u32()?))
    }

    fn get_f64(&mut self) -> Result<f64, ReadError> {
        Ok(f64::from_bits(self.get_i64()? as u64))
    }

    /// Signed 16.16 fixed-point, as used by ICC and some TIFF dialects.
    fn get_s15_fixed16(&mut self) -> Result<f32, ReadError> {
        let mut buf = [0u8; 4];
        self.get_bytes_into(&mut buf)?;
        Ok(self.byte_order().read_s15_fixed16(buf))
    }

    /// Read exactly `len` bytes and decode them.
    fn get_string(&mut self, len: usize, charset: Charset) -> Result<String, ReadError> {
        Ok(charset.decode(&self.get_bytes(len)?))
    }

    fn get_string_value(
        &mut self,
        len: usize,
        charset: Option<Charset>,
    ) -> Result<StringValue, ReadError> {
        Ok(StringValue::new(self.get_bytes(len)?, charset))
    }

    /// Read up to `max_len` bytes, stopping after the first zero byte.
    ///
    /// The terminator is consumed but not returned.
    fn get_null_terminated_bytes(&mut self, max_len: usize) -> Result<Vec<u8>, ReadError> {
        let mut buf = Vec::new();
        while buf.len() < max_len {
            let b = self.get_u8()?;
            if b == 0 {
                break;
            }
            buf.push(b);
        }
        Ok(buf)
    }

    fn get_null_terminated_string(
        &mut self,
        max_len: usize,
        charset: Charset,
    ) -> Result<String, ReadError> {
        Ok(charset.decode(&self.get_null_terminated_bytes(max_len)?))
    }

    fn get_null_terminated_string_value(
        &mut self,
        max_len: usize,
        charset: Option<Charset>,
    ) -> Result<StringValue, ReadError> {
        Ok(StringValue::new(
            self.get_null_terminated_bytes(max_len)?,
            charset,
        ))
    }
}
