//! Exif metadata.
//!
//! Exif is a TIFF structure. In JPEG files it sits in APP1 segments behind
//! a six-byte `Exif\0\0` preamble; TIFF-based raw files are Exif from the
//! first byte.

mod handler;
pub mod tags;

use bytes::Bytes;
use tracing::debug;

use crate::format::tiff::TiffReader;
use crate::io::ByteArrayReader;
use crate::model::{Directory, DirectoryId, DirectoryKind, Metadata};

pub use handler::ExifTiffHandler;

/// Marks an APP1 segment as Exif
pub const EXIF_PREAMBLE: &[u8] = b"Exif\0\0";

/// Whether a JPEG APP1 payload carries Exif data.
pub fn is_exif_segment(payload: &[u8]) -> bool {
    payload.starts_with(EXIF_PREAMBLE)
}

/// Decode every Exif APP1 payload among `segments`; others are ignored.
pub fn read_exif_segments(
    tiff_reader: &TiffReader,
    segments: &[Bytes],
    metadata: &mut Metadata,
    parent: Option<DirectoryId>,
) {
    for segment in segments {
        if is_exif_segment(segment) {
            read_exif_segment(tiff_reader, segment.clone(), metadata, parent);
        } else {
            debug!(len = segment.len(), "APP1 segment without Exif preamble skipped");
        }
    }
}

/// Decode one Exif APP1 payload, preamble included.
///
/// A TIFF block that cannot be decoded becomes an `Error` directory, so a
/// broken Exif segment never fails the surrounding JPEG.
pub fn read_exif_segment(
    tiff_reader: &TiffReader,
    payload: Bytes,
    metadata: &mut Metadata,
    parent: Option<DirectoryId>,
) {
    let mut reader = ByteArrayReader::with_base_offset(payload, EXIF_PREAMBLE.len());
    let mut handler = ExifTiffHandler::new(metadata, parent);
    if let Err(e) = tiff_reader.process_tiff(&mut reader, &mut handler, 0) {
        debug!(error = %e, "Exif TIFF data rejected");
        let mut directory = Directory::new(DirectoryKind::Error);
        directory.add_error(format!("Exception processing TIFF data: {e}"));
        metadata.add_directory(directory);
    }
}
