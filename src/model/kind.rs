//! Directory schemas.

use serde::Serialize;

use crate::format::exif::tags::{self, EXIF_TAG_NAMES, GPS_TAG_NAMES, INTEROP_TAG_NAMES};
use crate::format::jpeg::{JPEG_COMMENT_TAG_NAMES, JPEG_TAG_NAMES};

/// The kind of a [`Directory`](super::Directory): its display name and tag-name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DirectoryKind {
    ExifIfd0,
    ExifSubIfd,
    ExifInterop,
    ExifThumbnail,
    /// Additional page in a multi-page TIFF
    ExifImage,
    Gps,
    PanasonicRawIfd0,
    CanonMakernote,
    NikonType1Makernote,
    /// JPEG frame header (SOFn)
    Jpeg,
    JpegComment,
    /// Holds errors raised while no other directory was current
    Error,
}

impl DirectoryKind {
    pub const fn name(self) -> &'static str {
        match self {
            DirectoryKind::ExifIfd0 => "Exif IFD0",
            DirectoryKind::ExifSubIfd => "Exif SubIFD",
            DirectoryKind::ExifInterop => "Interoperability",
            DirectoryKind::ExifThumbnail => "Exif Thumbnail",
            DirectoryKind::ExifImage => "Exif Image",
            DirectoryKind::Gps => "GPS",
            DirectoryKind::PanasonicRawIfd0 => "PanasonicRaw Exif IFD0",
            DirectoryKind::CanonMakernote => "Canon Makernote",
            DirectoryKind::NikonType1Makernote => "Nikon Makernote",
            DirectoryKind::Jpeg => "JPEG",
            DirectoryKind::JpegComment => "JpegComment",
            DirectoryKind::Error => "Error",
        }
    }

    fn tag_names(self) -> &'static [(u32, &'static str)] {
        match self {
            DirectoryKind::ExifIfd0
            | DirectoryKind::ExifSubIfd
            | DirectoryKind::ExifThumbnail
            | DirectoryKind::ExifImage
            | DirectoryKind::PanasonicRawIfd0 => EXIF_TAG_NAMES,
            DirectoryKind::ExifInterop => INTEROP_TAG_NAMES,
            DirectoryKind::Gps => GPS_TAG_NAMES,
            DirectoryKind::Jpeg => JPEG_TAG_NAMES,
            DirectoryKind::JpegComment => JPEG_COMMENT_TAG_NAMES,
            DirectoryKind::CanonMakernote
            | DirectoryKind::NikonType1Makernote
            | DirectoryKind::Error => &[],
        }
    }

    /// Known name for `tag`, if this kind's table has one.
    pub fn tag_name(self, tag: u32) -> Option<&'static str> {
        tags::lookup(self.tag_names(), tag)
    }
}

// =============================================================================
// Tests
// =============================================================================
