//! SOFn frame headers and COM comments.

use std::any::Any;
use std::fmt;

use bytes::Bytes;

use crate::error::ReadError;
use crate::io::{SequentialByteArrayReader, SequentialReader};
use crate::model::{Directory, DirectoryKind, ObjectValue, StringValue};

use super::JpegSegmentType;

// =============================================================================
// Tags
// =============================================================================

/// Frame type as an offset from SOF0 (0 = baseline, 2 = progressive, ...)
pub const TAG_COMPRESSION_TYPE: u32 = 0xFFFD;
pub const TAG_DATA_PRECISION: u32 = 0;
pub const TAG_IMAGE_HEIGHT: u32 = 1;
pub const TAG_IMAGE_WIDTH: u32 = 3;
pub const TAG_NUMBER_OF_COMPONENTS: u32 = 5;
/// First of the per-component tags; component `i` is at `TAG_COMPONENT_DATA_1 + i`
pub const TAG_COMPONENT_DATA_1: u32 = 6;

pub const TAG_COMMENT: u32 = 0;

pub static JPEG_TAG_NAMES: &[(u32, &str)] = &[
    (TAG_COMPRESSION_TYPE, "Compression Type"),
    (TAG_DATA_PRECISION, "Data Precision"),
    (TAG_IMAGE_HEIGHT, "Image Height"),
    (TAG_IMAGE_WIDTH, "Image Width"),
    (TAG_NUMBER_OF_COMPONENTS, "Number of Components"),
    (TAG_COMPONENT_DATA_1, "Component 1"),
    (TAG_COMPONENT_DATA_1 + 1, "Component 2"),
    (TAG_COMPONENT_DATA_1 + 2, "Component 3"),
    (TAG_COMPONENT_DATA_1 + 3, "Component 4"),
];

pub static JPEG_COMMENT_TAG_NAMES: &[(u32, &str)] = &[(TAG_COMMENT, "JPEG Comment")];

// =============================================================================
// Components
// =============================================================================

/// One colour component declared in a frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegComponent {
    pub component_id: u8,
    pub sampling_factor_byte: u8,
    pub quantization_table_number: u8,
}

impl JpegComponent {
    /// Conventional name for the component id (`Y`, `Cb`, `Cr`, `I`, `Q`).
    pub fn component_name(&self) -> Option<&'static str> {
        match self.component_id {
            1 => Some("Y"),
            2 => Some("Cb"),
            3 => Some("Cr"),
            4 => Some("I"),
            5 => Some("Q"),
            _ => None,
        }
    }

    #[inline]
    pub fn horizontal_sampling_factor(&self) -> u8 {
        (self.sampling_factor_byte >> 4) & 0x0F
    }

    #[inline]
    pub fn vertical_sampling_factor(&self) -> u8 {
        self.sampling_factor_byte & 0x0F
    }
}

impl fmt::Display for JpegComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.component_name() {
            Some(name) => write!(f, "{name} component")?,
            None => write!(f, "Component {}", self.component_id)?,
        }
        write!(
            f,
            ": Quantization table {}, Sampling factors {} horiz/{} vert",
            self.quantization_table_number,
            self.horizontal_sampling_factor(),
            self.vertical_sampling_factor()
        )
    }
}

impl ObjectValue for JpegComponent {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a SOFn payload into a `Jpeg` directory.
///
/// A truncated payload keeps the fields read so far and records the read
/// failure as a directory error.
pub fn read_frame(segment_type: JpegSegmentType, payload: Bytes) -> Directory {
    let mut directory = Directory::new(DirectoryKind::Jpeg);
    directory.set_int(
        TAG_COMPRESSION_TYPE,
        i32::from(segment_type.as_u8()) - i32::from(JpegSegmentType::Sof0.as_u8()),
    );

    let mut reader = SequentialByteArrayReader::new(payload);
    if let Err(e) = read_frame_fields(&mut reader, &mut directory) {
        directory.add_error(e.to_string());
    }
    directory
}

fn read_frame_fields(
    reader: &mut SequentialByteArrayReader,
    directory: &mut Directory,
) -> Result<(), ReadError> {
    directory.set_int(TAG_DATA_PRECISION, i32::from(reader.get_u8()?));
    directory.set_int(TAG_IMAGE_HEIGHT, i32::from(reader.get_u16()?));
    directory.set_int(TAG_IMAGE_WIDTH, i32::from(reader.get_u16()?));

    let component_count = reader.get_u8()?;
    directory.set_int(TAG_NUMBER_OF_COMPONENTS, i32::from(component_count));

    for i in 0..u32::from(component_count) {
        let component = JpegComponent {
            component_id: reader.get_u8()?,
            sampling_factor_byte: reader.get_u8()?,
            quantization_table_number: reader.get_u8()?,
        };
        directory.set_object(TAG_COMPONENT_DATA_1 + i, component);
    }
    Ok(())
}

/// Wrap a COM payload in a `JpegComment` directory. The charset is left
/// undetermined.
pub fn read_comment(payload: Bytes) -> Directory {
    let mut directory = Directory::new(DirectoryKind::JpegComment);
    directory.set_string_value(TAG_COMMENT, StringValue::new(payload, None));
    directory
}

// =============================================================================
// Tests
// =============================================================================
