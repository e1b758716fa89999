//! The callback contract between [`TiffReader`](super::TiffReader) and the
//! code that gives meaning to tags.

use crate::error::{ReadError, TiffError};
use crate::io::RandomAccessReader;
use crate::model::{Rational, StringValue, TagValue};

/// One decoded 12-byte IFD entry, with its value location resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    pub tag_id: u16,
    pub format_code: u16,
    pub component_count: u32,
    /// Absolute index of the value bytes (inline or pointed-to)
    pub value_offset: u64,
    pub byte_count: u64,
    /// Header offset that pointers in this IFD are relative to
    pub tiff_header_offset: u64,
}

/// Outcome of [`TiffHandler::custom_process_tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomTag {
    /// Not handled; decode the entry normally
    Declined,
    /// Handled; nothing more to do
    Consumed,
    /// Handled, and the reader should walk an IFD at `ifd_offset` whose
    /// pointers are relative to `tiff_header_offset`. The handler has
    /// already pushed the directory that IFD fills.
    WalkIfd {
        ifd_offset: u64,
        tiff_header_offset: u64,
    },
}

/// Receives the structure and values found while walking a TIFF.
///
/// Each IFD the reader enters, through the header, a sub-IFD pointer, a
/// follower link or [`CustomTag::WalkIfd`], is matched by exactly one
/// [`ending_ifd`](Self::ending_ifd) call, including IFDs that are rejected
/// before any entry is read.
pub trait TiffHandler {
    /// Accept or reject the 16-bit marker following the byte-order bytes.
    fn set_tiff_marker(&mut self, marker: u16) -> Result<(), TiffError>;

    /// Called for each 4-byte pointer of a tag that could be a sub-IFD.
    /// Returning `true` means the handler has opened a directory for it.
    fn try_enter_sub_ifd(&mut self, tag: u16) -> bool;

    /// Whether to follow the next-IFD link of the current IFD.
    fn has_follower_ifd(&mut self) -> bool;

    fn ending_ifd(&mut self);

    /// Byte count for an entry whose format code is not a standard one,
    /// or `None` to reject the entry.
    fn try_custom_process_format(&mut self, tag: u16, format_code: u16, component_count: u32) -> Option<u64>;

    /// First refusal on every entry that was not entered as a sub-IFD.
    fn custom_process_tag(
        &mut self,
        reader: &mut dyn RandomAccessReader,
        entry: &IfdEntry,
    ) -> Result<CustomTag, ReadError>;

    fn warn(&mut self, message: &str);

    fn error(&mut self, message: &str);

    /// Store a decoded value. All typed setters funnel into this.
    fn set_tag_value(&mut self, tag: u16, value: TagValue);

    // -------------------------------------------------------------------------
    // Typed setters
    // -------------------------------------------------------------------------

    fn set_int8s(&mut self, tag: u16, value: i8) {
        self.set_tag_value(tag, TagValue::Int(i32::from(value)));
    }

    fn set_int8s_array(&mut self, tag: u16, values: Vec<i8>) {
        self.set_tag_value(tag, TagValue::IntArray(values.into_iter().map(i32::from).collect()));
    }

    fn set_int8u(&mut self, tag: u16, value: u8) {
        self.set_tag_value(tag, TagValue::Int(i32::from(value)));
    }

    fn set_int8u_array(&mut self, tag: u16, values: Vec<u8>) {
        self.set_tag_value(tag, TagValue::IntArray(values.into_iter().map(i32::from).collect()));
    }

    fn set_int16s(&mut self, tag: u16, value: i16) {
        self.set_tag_value(tag, TagValue::Int(i32::from(value)));
    }

    fn set_int16s_array(&mut self, tag: u16, values: Vec<i16>) {
        self.set_tag_value(tag, TagValue::IntArray(values.into_iter().map(i32::from).collect()));
    }

    fn set_int16u(&mut self, tag: u16, value: u16) {
        self.set_tag_value(tag, TagValue::Int(i32::from(value)));
    }

    fn set_int16u_array(&mut self, tag: u16, values: Vec<u16>) {
        self.set_tag_value(tag, TagValue::IntArray(values.into_iter().map(i32::from).collect()));
    }

    fn set_int32s(&mut self, tag: u16, value: i32) {
        self.set_tag_value(tag, TagValue::Int(value));
    }

    fn set_int32s_array(&mut self, tag: u16, values: Vec<i32>) {
        self.set_tag_value(tag, TagValue::IntArray(values));
    }

    fn set_int32u(&mut self, tag: u16, value: u32) {
        self.set_tag_value(tag, TagValue::Long(i64::from(value)));
    }

    fn set_int32u_array(&mut self, tag: u16, values: Vec<u32>) {
        self.set_tag_value(tag, TagValue::LongArray(values.into_iter().map(i64::from).collect()));
    }

    fn set_float(&mut self, tag: u16, value: f32) {
        self.set_tag_value(tag, TagValue::Float(value));
    }

    fn set_float_array(&mut self, tag: u16, values: Vec<f32>) {
        self.set_tag_value(tag, TagValue::FloatArray(values));
    }

    fn set_double(&mut self, tag: u16, value: f64) {
        self.set_tag_value(tag, TagValue::Double(value));
    }

    fn set_double_array(&mut self, tag: u16, values: Vec<f64>) {
        self.set_tag_value(tag, TagValue::DoubleArray(values));
    }

    fn set_rational(&mut self, tag: u16, value: Rational) {
        self.set_tag_value(tag, TagValue::Rational(value));
    }

    fn set_rational_array(&mut self, tag: u16, values: Vec<Rational>) {
        self.set_tag_value(tag, TagValue::RationalArray(values));
    }

    fn set_string(&mut self, tag: u16, value: StringValue) {
        self.set_tag_value(tag, TagValue::Str(value));
    }

    fn set_byte_array(&mut self, tag: u16, bytes: Vec<u8>) {
        self.set_tag_value(tag, TagValue::ByteArray(bytes));
    }
}
