//! File type detection from magic bytes.
//!
//! Supported containers:
//!
//! - **JPEG**: `FF D8`
//! - **TIFF**: `II 2A 00` / `MM 00 2A`
//! - **Olympus ORF**: TIFF layout with marker `0x4F52` or `0x5352`
//! - **Panasonic RW2**: TIFF layout with marker `0x0055`

use crate::io::ByteOrder;

// =============================================================================
// FileType
// =============================================================================

/// Container formats metadata can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Jpeg,
    Tiff,
    OlympusRaw,
    PanasonicRaw,
}

impl FileType {
    /// Get a human-readable name for the format.
    pub const fn name(&self) -> &'static str {
        match self {
            FileType::Jpeg => "JPEG",
            FileType::Tiff => "TIFF",
            FileType::OlympusRaw => "ORF",
            FileType::PanasonicRaw => "RW2",
        }
    }

    /// Whether the file is decoded as a bare TIFF structure.
    pub const fn is_tiff_based(&self) -> bool {
        !matches!(self, FileType::Jpeg)
    }
}

// =============================================================================
// Detection
// =============================================================================

/// Number of leading bytes [`detect_file_type`] looks at.
pub const MAGIC_LEN: usize = 4;

/// Identify a file from its first bytes.
///
/// Returns `None` for anything unrecognised, including input shorter than
/// the magic it would need.
pub fn detect_file_type(bytes: &[u8]) -> Option<FileType> {
    if bytes.starts_with(&[0xFF, 0xD8]) {
        return Some(FileType::Jpeg);
    }
    if bytes.len() < MAGIC_LEN {
        return None;
    }

    let order = match [bytes[0], bytes[1]] {
        [0x49, 0x49] => ByteOrder::LittleEndian,
        [0x4D, 0x4D] => ByteOrder::BigEndian,
        _ => return None,
    };

    match order.read_u16([bytes[2], bytes[3]]) {
        0x002A => Some(FileType::Tiff),
        0x4F52 | 0x5352 => Some(FileType::OlympusRaw),
        0x0055 => Some(FileType::PanasonicRaw),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
