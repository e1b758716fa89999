// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) used to assemble multi-byte values.
///
/// TIFF streams declare their order in the first two bytes of the header
/// ("II" = Intel, "MM" = Motorola). JPEG segment lengths are always
/// big-endian. Readers default to big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Big-endian ("MM" = Motorola, network order)
    #[default]
    BigEndian,
    /// Little-endian ("II" = Intel)
    LittleEndian,
}

impl ByteOrder {
    /// Byte order for the given Motorola flag.
    #[inline]
    pub const fn from_motorola(motorola: bool) -> Self {
        if motorola {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    /// Whether this is Motorola (big-endian) order.
    #[inline]
    pub const fn is_motorola(self) -> bool {
        matches!(self, ByteOrder::BigEndian)
    }

    /// The opposite byte order.
    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            ByteOrder::BigEndian => ByteOrder::LittleEndian,
            ByteOrder::LittleEndian => ByteOrder::BigEndian,
        }
    }

    #[inline]
    pub fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    /// Read an unsigned 24-bit value into the low bits of a u32.
    #[inline]
    pub fn read_u24(self, bytes: [u8; 3]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]),
            ByteOrder::BigEndian => u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]),
        }
    }

    #[inline]
    pub fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }

    #[inline]
    pub fn read_u64(self, bytes: [u8; 8]) -> u64 {
        match self {
            ByteOrder::LittleEndian => u64::from_le_bytes(bytes),
            ByteOrder::BigEndian => u64::from_be_bytes(bytes),
        }
    }

    /// Decode a signed s15.16 fixed-point value.
    #[inline]
    pub fn read_s15_fixed16(self, bytes: [u8; 4]) -> f32 {
        let raw = self.read_u32(bytes) as i32;
        (f64::from(raw) / 65536.0) as f32
    }
}

// =============================================================================
// Tests
// =============================================================================
