//! JPEG marker vocabulary.
//!
//! Every segment in a JPEG stream starts with `0xFF` followed by a marker
//! byte. The marker decides whether a length-prefixed payload follows and
//! what it contains.

/// Start Of Image; the first two bytes of every JPEG stream
pub const SOI: u16 = 0xFFD8;

/// JPEG segment types, identified by their marker byte.
///
/// SOF4 (0xC4), SOF8 (0xC8) and SOF12 (0xCC) do not exist: those bytes
/// are DHT, JPG and DAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum JpegSegmentType {
    // -------------------------------------------------------------------------
    // Application segments
    // -------------------------------------------------------------------------
    /// JFIF / JFXX
    App0 = 0xE0,
    /// Exif, XMP
    App1 = 0xE1,
    App2 = 0xE2,
    App3 = 0xE3,
    App4 = 0xE4,
    App5 = 0xE5,
    App6 = 0xE6,
    App7 = 0xE7,
    App8 = 0xE8,
    App9 = 0xE9,
    AppA = 0xEA,
    AppB = 0xEB,
    AppC = 0xEC,
    /// IPTC / Photoshop
    AppD = 0xED,
    /// Adobe
    AppE = 0xEE,
    AppF = 0xEF,

    // -------------------------------------------------------------------------
    // Frame headers
    // -------------------------------------------------------------------------
    /// Baseline DCT
    Sof0 = 0xC0,
    /// Extended sequential DCT, Huffman
    Sof1 = 0xC1,
    /// Progressive DCT, Huffman
    Sof2 = 0xC2,
    /// Lossless, Huffman
    Sof3 = 0xC3,
    Sof5 = 0xC5,
    Sof6 = 0xC6,
    Sof7 = 0xC7,
    Sof9 = 0xC9,
    Sof10 = 0xCA,
    Sof11 = 0xCB,
    Sof13 = 0xCD,
    Sof14 = 0xCE,
    Sof15 = 0xCF,

    // -------------------------------------------------------------------------
    // Tables and miscellany
    // -------------------------------------------------------------------------
    /// Define Huffman Table
    Dht = 0xC4,
    /// Define Arithmetic Coding conditioning
    Dac = 0xCC,
    /// Define Quantization Table
    Dqt = 0xDB,
    /// Define Number of Lines
    Dnl = 0xDC,
    /// Define Restart Interval
    Dri = 0xDD,
    /// Define Hierarchical Progression
    Dhp = 0xDE,
    /// Expand reference component
    Exp = 0xDF,
    /// Comment
    Com = 0xFE,

    // -------------------------------------------------------------------------
    // Scan boundaries
    // -------------------------------------------------------------------------
    /// Start Of Scan; entropy-coded data follows
    Sos = 0xDA,
    /// End Of Image
    Eoi = 0xD9,
}

impl JpegSegmentType {
    /// Frame header types, SOF0 through SOF15.
    pub const FRAME_TYPES: [JpegSegmentType; 13] = [
        JpegSegmentType::Sof0,
        JpegSegmentType::Sof1,
        JpegSegmentType::Sof2,
        JpegSegmentType::Sof3,
        JpegSegmentType::Sof5,
        JpegSegmentType::Sof6,
        JpegSegmentType::Sof7,
        JpegSegmentType::Sof9,
        JpegSegmentType::Sof10,
        JpegSegmentType::Sof11,
        JpegSegmentType::Sof13,
        JpegSegmentType::Sof14,
        JpegSegmentType::Sof15,
    ];

    /// Look up the type for a marker byte.
    ///
    /// Returns `None` for markers this crate does not model (RSTn, TEM, JPGn).
    pub fn from_u8(marker: u8) -> Option<Self> {
        use JpegSegmentType::*;
        let kind = match marker {
            0xE0 => App0,
            0xE1 => App1,
            0xE2 => App2,
            0xE3 => App3,
            0xE4 => App4,
            0xE5 => App5,
            0xE6 => App6,
            0xE7 => App7,
            0xE8 => App8,
            0xE9 => App9,
            0xEA => AppA,
            0xEB => AppB,
            0xEC => AppC,
            0xED => AppD,
            0xEE => AppE,
            0xEF => AppF,
            0xC0 => Sof0,
            0xC1 => Sof1,
            0xC2 => Sof2,
            0xC3 => Sof3,
            0xC5 => Sof5,
            0xC6 => Sof6,
            0xC7 => Sof7,
            0xC9 => Sof9,
            0xCA => Sof10,
            0xCB => Sof11,
            0xCD => Sof13,
            0xCE => Sof14,
            0xCF => Sof15,
            0xC4 => Dht,
            0xCC => Dac,
            0xDB => Dqt,
            0xDC => Dnl,
            0xDD => Dri,
            0xDE => Dhp,
            0xDF => Exp,
            0xFE => Com,
            0xDA => Sos,
            0xD9 => Eoi,
            _ => return None,
        };
        Some(kind)
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether segments of this type may carry metadata worth extracting.
    pub const fn can_contain_metadata(self) -> bool {
        use JpegSegmentType::*;
        !matches!(self, Dht | Dac | Dqt | Dnl | Dri | Dhp | Exp | Sos | Eoi)
    }

    #[inline]
    pub fn is_frame(self) -> bool {
        Self::FRAME_TYPES.contains(&self)
    }

    /// Every type for which [`can_contain_metadata`](Self::can_contain_metadata) holds.
    pub fn metadata_types() -> Vec<JpegSegmentType> {
        (0u8..=0xFF)
            .filter_map(Self::from_u8)
            .filter(|t| t.can_contain_metadata())
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
