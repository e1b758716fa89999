//! TIFF field types.

/// Encoding of the values in an IFD entry.
///
/// The component size decides how many bytes an entry's values occupy and
/// therefore whether they sit inline in the entry (four bytes or fewer) or
/// at an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TiffDataFormat {
    /// Unsigned 8-bit integer
    Int8u = 1,
    /// NUL-terminated 8-bit text
    String = 2,
    Int16u = 3,
    Int32u = 4,
    /// Two unsigned 32-bit integers: numerator, denominator
    Rational64u = 5,
    Int8s = 6,
    /// Opaque bytes
    Undefined = 7,
    Int16s = 8,
    Int32s = 9,
    /// Two signed 32-bit integers: numerator, denominator
    Rational64s = 10,
    Float32 = 11,
    Float64 = 12,
}

impl TiffDataFormat {
    /// Look up a format by its on-disk code (1-12).
    pub fn from_code(code: u16) -> Option<Self> {
        use TiffDataFormat::*;
        let format = match code {
            1 => Int8u,
            2 => String,
            3 => Int16u,
            4 => Int32u,
            5 => Rational64u,
            6 => Int8s,
            7 => Undefined,
            8 => Int16s,
            9 => Int32s,
            10 => Rational64s,
            11 => Float32,
            12 => Float64,
            _ => return None,
        };
        Some(format)
    }

    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Size of one component in bytes.
    #[inline]
    pub const fn component_size(self) -> u64 {
        use TiffDataFormat::*;
        match self {
            Int8u | String | Int8s | Undefined => 1,
            Int16u | Int16s => 2,
            Int32u | Int32s | Float32 => 4,
            Rational64u | Rational64s | Float64 => 8,
        }
    }

    pub const fn name(self) -> &'static str {
        use TiffDataFormat::*;
        match self {
            Int8u => "BYTE",
            String => "STRING",
            Int16u => "USHORT",
            Int32u => "ULONG",
            Rational64u => "URATIONAL",
            Int8s => "SBYTE",
            Undefined => "UNDEFINED",
            Int16s => "SSHORT",
            Int32s => "SLONG",
            Rational64s => "SRATIONAL",
            Float32 => "SINGLE",
            Float64 => "DOUBLE",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
