use tracing::debug;

use crate::error::{ReadError, TiffError};
use crate::format::tiff::{CustomTag, DirectoryTiffHandler, IfdEntry, TiffHandler};
use crate::io::RandomAccessReader;
use crate::model::{DirectoryId, DirectoryKind, Metadata, TagValue};

use super::tags::{
    TAG_EMPTY, TAG_EXIF_SUB_IFD_OFFSET, TAG_GPS_INFO_OFFSET, TAG_INTEROP_OFFSET, TAG_MAKE,
    TAG_MAKERNOTE, TAG_PAGE_NUMBER, TAG_SUB_IFD_OFFSET,
};

const TIFF_MARKER_STANDARD: u16 = 0x002A;
const TIFF_MARKER_OLYMPUS_RAW: u16 = 0x4F52;
const TIFF_MARKER_OLYMPUS_RAW_2: u16 = 0x5352;
const TIFF_MARKER_PANASONIC_RAW: u16 = 0x0055;

/// Format code some writers use for entries that hold IFD offsets
const FORMAT_CODE_IFD: u16 = 13;

/// Maps Exif IFDs onto directories.
///
/// Decides which pointer tags open which directory (SubIFD, Exif, GPS,
/// Interoperability), what a chained IFD means (thumbnail or further page),
/// and which MakerNotes are walked as IFDs.
pub struct ExifTiffHandler<'m> {
    base: DirectoryTiffHandler<'m>,
}

impl<'m> ExifTiffHandler<'m> {
    /// Directories created before anything else is current get `parent`.
    pub fn new(metadata: &'m mut Metadata, parent: Option<DirectoryId>) -> Self {
        Self {
            base: DirectoryTiffHandler::new(metadata, parent),
        }
    }

    fn current_kind(&self) -> Option<DirectoryKind> {
        self.base.current_kind()
    }

    fn camera_make(&self) -> Option<String> {
        self.base
            .metadata()
            .first_directory_of_kind(DirectoryKind::ExifIfd0)?
            .get_string(u32::from(TAG_MAKE))
    }

    fn process_makernote(
        &mut self,
        reader: &mut dyn RandomAccessReader,
        entry: &IfdEntry,
    ) -> Result<CustomTag, ReadError> {
        let offset = entry.value_offset;
        let signature = leading_bytes(reader, offset, 5)?;

        if signature == b"Nikon" {
            return match reader.get_u8(offset + 6)? {
                1 => {
                    self.base.push_directory(DirectoryKind::NikonType1Makernote);
                    Ok(CustomTag::WalkIfd {
                        ifd_offset: offset + 8,
                        tiff_header_offset: entry.tiff_header_offset,
                    })
                }
                _ => {
                    self.base.error("Unsupported Nikon makernote data ignored.");
                    Ok(CustomTag::Consumed)
                }
            };
        }

        let is_canon = self
            .camera_make()
            .is_some_and(|make| make.to_uppercase().starts_with("CANON"));
        if is_canon {
            self.base.push_directory(DirectoryKind::CanonMakernote);
            return Ok(CustomTag::WalkIfd {
                ifd_offset: offset,
                tiff_header_offset: entry.tiff_header_offset,
            });
        }

        debug!(offset, "makernote not recognised, storing raw bytes");
        Ok(CustomTag::Declined)
    }
}

/// Up to `count` bytes at `offset`, fewer if the data ends first.
fn leading_bytes(
    reader: &mut dyn RandomAccessReader,
    offset: u64,
    count: usize,
) -> Result<Vec<u8>, ReadError> {
    let available = reader.length()?.saturating_sub(offset).min(count as u64);
    reader.get_bytes(offset, available as usize)
}

impl TiffHandler for ExifTiffHandler<'_> {
    fn set_tiff_marker(&mut self, marker: u16) -> Result<(), TiffError> {
        match marker {
            TIFF_MARKER_STANDARD | TIFF_MARKER_OLYMPUS_RAW | TIFF_MARKER_OLYMPUS_RAW_2 => {
                self.base.push_directory(DirectoryKind::ExifIfd0);
            }
            TIFF_MARKER_PANASONIC_RAW => {
                self.base.push_directory(DirectoryKind::PanasonicRawIfd0);
            }
            other => return Err(TiffError::UnexpectedMarker(other)),
        }
        Ok(())
    }

    fn try_enter_sub_ifd(&mut self, tag: u16) -> bool {
        if tag == TAG_SUB_IFD_OFFSET {
            self.base.push_directory(DirectoryKind::ExifSubIfd);
            return true;
        }

        let kind = match (self.current_kind(), tag) {
            (
                Some(DirectoryKind::ExifIfd0 | DirectoryKind::PanasonicRawIfd0),
                TAG_EXIF_SUB_IFD_OFFSET,
            ) => DirectoryKind::ExifSubIfd,
            (Some(DirectoryKind::ExifIfd0 | DirectoryKind::PanasonicRawIfd0), TAG_GPS_INFO_OFFSET) => {
                DirectoryKind::Gps
            }
            (Some(DirectoryKind::ExifSubIfd), TAG_INTEROP_OFFSET) => DirectoryKind::ExifInterop,
            _ => return false,
        };
        self.base.push_directory(kind);
        true
    }

    fn has_follower_ifd(&mut self) -> bool {
        match self.current_kind() {
            Some(DirectoryKind::ExifIfd0 | DirectoryKind::ExifImage) => {
                let multi_page = self
                    .base
                    .current_directory()
                    .is_some_and(|d| d.contains_tag(u32::from(TAG_PAGE_NUMBER)));
                if multi_page {
                    self.base.push_directory(DirectoryKind::ExifImage);
                } else {
                    self.base.push_directory(DirectoryKind::ExifThumbnail);
                }
                true
            }
            // Some raw formats chain several thumbnail IFDs
            Some(DirectoryKind::ExifThumbnail) => true,
            _ => false,
        }
    }

    fn ending_ifd(&mut self) {
        self.base.ending_ifd();
    }

    fn try_custom_process_format(&mut self, _tag: u16, format_code: u16, component_count: u32) -> Option<u64> {
        match format_code {
            FORMAT_CODE_IFD => Some(u64::from(component_count) * 4),
            // Left for custom_process_tag to judge
            0 => Some(0),
            _ => None,
        }
    }

    fn custom_process_tag(
        &mut self,
        reader: &mut dyn RandomAccessReader,
        entry: &IfdEntry,
    ) -> Result<CustomTag, ReadError> {
        if entry.tag_id == TAG_EMPTY {
            let already_set = self
                .base
                .current_directory()
                .is_some_and(|d| d.contains_tag(u32::from(TAG_EMPTY)));
            if !already_set && entry.byte_count == 0 {
                return Ok(CustomTag::Consumed);
            }
            return Ok(CustomTag::Declined);
        }

        if entry.tag_id == TAG_MAKERNOTE && self.current_kind() == Some(DirectoryKind::ExifSubIfd) {
            return self.process_makernote(reader, entry);
        }

        Ok(CustomTag::Declined)
    }

    fn warn(&mut self, message: &str) {
        self.base.warn(message);
    }

    fn error(&mut self, message: &str) {
        self.base.error(message);
    }

    fn set_tag_value(&mut self, tag: u16, value: TagValue) {
        self.base.set(tag, value);
    }
}

// =============================================================================
// Tests
// =============================================================================
