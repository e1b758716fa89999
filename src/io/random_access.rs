//! Indexed readers.
//!
//! A [`RandomAccessReader`] decodes values at arbitrary offsets without a
//! cursor, which is what TIFF needs: IFD entries point all over the data.

use crate::error::ReadError;
use crate::model::{Charset, StringValue};

use super::ByteOrder;

/// Index-based primitive decoding.
///
/// The trait is object safe so handlers can receive `&mut dyn RandomAccessReader`.
/// Methods take `&mut self` because stream-backed implementations buffer lazily.
pub trait RandomAccessReader {
    fn byte_order(&self) -> ByteOrder;

    fn set_byte_order(&mut self, order: ByteOrder);

    /// Total number of bytes.
    ///
    /// Stream-backed readers must buffer the whole stream to answer this.
    fn length(&mut self) -> Result<u64, ReadError>;

    /// Whether `count` bytes starting at `index` are available.
    fn is_valid_index(&mut self, index: u64, count: u64) -> bool;

    /// Fill `buf` from the bytes starting at `index`.
    fn get_bytes_into(&mut self, index: u64, buf: &mut [u8]) -> Result<(), ReadError>;

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

    /// Fail with [`ReadError::EndOfData`] unless `count` bytes exist at `index`.
    fn validate_index(&mut self, index: u64, count: u64) -> Result<(), ReadError> {
        if self.is_valid_index(index, count) {
            return Ok(());
        }
        let length = self.length()?;
        Err(ReadError::EndOfData {
            index,
            requested: count,
            available: length.saturating_sub(index),
        })
    }

    fn get_u8(&mut self, index: u64) -> Result<u8, ReadError> {
        let mut buf = [0u8; 1];
        self.get_bytes_into(index, &mut buf)?;
        Ok(buf[0])
    }

    fn get_i8(&mut self, index: u64) -> Result<i8, ReadError> {
        Ok(self.get_u8(index)? as i8)
    }

    /// Read a single bit, counting from the least significant bit of byte 0.
    fn get_bit(&mut self, bit_index: u64) -> Result<bool, ReadError> {
        let byte = self.get_u8(bit_index / 8)?;
        Ok((byte >> (bit_index % 8)) & 1 == 1)
    }

    /// Read `count` bytes at `index` into a new buffer.
    ///
    /// Bounds are checked before allocating.
    fn get_bytes(&mut self, index: u64, count: usize) -> Result<Vec<u8>, ReadError> {
        self.validate_index(index, count as u64)?;
        let mut buf = vec![0u8; count];
        self.get_bytes_into(index, &mut buf)?;
        Ok(buf)
    }

    fn get_u16(&mut self, index: u64) -> Result<u16, ReadError> {
        let mut buf = [0u8; 2];
        self.get_bytes_into(index, &mut buf)?;
        Ok(self.byte_order().read_u16(buf))
    }

    fn get_i16(&mut self, index: u64) -> Result<i16, ReadError> {
        Ok(self.get_u16(index)? as i16)
    }

    fn get_u24(&mut self, index: u64) -> Result<u32, ReadError> {
        let mut buf = [0u8; 3];
        self.get_bytes_into(index, &mut buf)?;
        Ok(self.byte_order().read_u24(buf))
    }

    fn get_u32(&mut self, index: u64) -> Result<u32, ReadError> {
        let mut buf = [0u8; 4];
        self.get_bytes_into(index, &mut buf)?;
        Ok(self.byte_order().read_u32(buf))
    }

    fn get_i32(&mut self, index: u64) -> Result<i32, ReadError> {
        Ok(self.get_u32(index)? as i32)
    }

    fn get_i64(&mut self, index: u64) -> Result<i64, ReadError> {
        let mut buf = [0u8; 8];
        self.get_bytes_into(index, &mut buf)?;
        Ok(self.byte_order().read_u64(buf) as i64)
    }

    fn get_f32(&mut self, index: u64) -> Result<f32, ReadError> {
        Ok(f32::from_bits(self.get_u32(index)?))
    }

    fn get_f64(&mut self, index: u64) -> Result<f64, ReadError> {
        Ok(f64::from_bits(self.get_i64(index)? as u64))
    }

    fn get_s15_fixed16(&mut self, index: u64) -> Result<f32, ReadError> {
        let mut buf = [0u8; 4];
        self.get_bytes_into(index, &mut buf)?;
        Ok(self.byte_order().read_s15_fixed16(buf))
    }

    fn get_string(&mut self, index: u64, len: usize, charset: Charset) -> Result<String, ReadError> {
        Ok(charset.decode(&self.get_bytes(index, len)?))
    }

    fn get_string_value(
        &mut self,
        index: u64,
        len: usize,
        charset: Option<Charset>,
    ) -> Result<StringValue, ReadError> {
        Ok(StringValue::new(self.get_bytes(index, len)?, charset))
    }

    /// Read up to `max_len` bytes at `index`, returning those before the first zero.
    fn get_null_terminated_bytes(&mut self, index: u64, max_len: usize) -> Result<Vec<u8>, ReadError> {
        let mut bytes = self.get_bytes(index, max_len)?;
        if let Some(end) = bytes.iter().position(|&b| b == 0) {
            bytes.truncate(end);
        }
        Ok(bytes)
    }

    fn get_null_terminated_string(
        &mut self,
        index: u64,
        max_len: usize,
        charset: Charset,
    ) -> Result<String, ReadError> {
        Ok(charset.decode(&self.get_null_terminated_bytes(index, max_len)?))
    }

    fn get_null_terminated_string_value(
        &mut self,
        index: u64,
        max_len: usize,
        charset: Option<Charset>,
    ) -> Result<StringValue, ReadError> {
        Ok(StringValue::new(
            self.get_null_terminated_bytes(index, max_len)?,
            charset,
        ))
    }
}
