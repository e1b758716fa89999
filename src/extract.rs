//! Top-level metadata extraction.
//!
//! These functions own acquisition: they detect the container from its
//! magic bytes, pick the right reader and hand back a [`Metadata`]. Any
//! recognisable input yields metadata; problems inside it are recorded as
//! directory errors.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::error::{MetadataError, ReadError};
use crate::format::detect::MAGIC_LEN;
use crate::format::exif::{read_exif_segments, ExifTiffHandler};
use crate::format::jpeg::{read_comment, read_frame, JpegSegmentData, JpegSegmentReader, JpegSegmentType};
use crate::format::tiff::{TiffReader, DEFAULT_MAX_FORMAT_ERRORS};
use crate::format::{detect_file_type, FileType};
use crate::io::{
    ByteArrayReader, RandomAccessReader, RandomAccessStreamReader, SequentialByteArrayReader,
    SequentialReader, StreamReader, DEFAULT_CHUNK_LEN,
};
use crate::model::Metadata;

// =============================================================================
// Options
// =============================================================================

/// Tuning knobs for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Invalid format codes tolerated per IFD before it is abandoned
    pub max_format_errors: usize,
    /// Bytes pulled per read when a TIFF is decoded from a stream
    pub chunk_len: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_format_errors: DEFAULT_MAX_FORMAT_ERRORS,
            chunk_len: DEFAULT_CHUNK_LEN,
        }
    }
}

impl ExtractOptions {
    fn tiff_reader(&self) -> TiffReader {
        TiffReader::new().with_max_format_errors(self.max_format_errors)
    }
}

/// Segment types the JPEG path decodes.
pub fn jpeg_metadata_segment_types() -> Vec<JpegSegmentType> {
    let mut types = JpegSegmentType::FRAME_TYPES.to_vec();
    types.push(JpegSegmentType::Com);
    types.push(JpegSegmentType::App1);
    types
}

// =============================================================================
// Entry points
// =============================================================================

/// Read metadata from any byte source, detecting its format.
pub fn read_metadata<R: Read>(source: R) -> Result<Metadata, MetadataError> {
    read_metadata_with(source, &ExtractOptions::default())
}

pub fn read_metadata_with<R: Read>(mut source: R, options: &ExtractOptions) -> Result<Metadata, MetadataError> {
    let mut magic = Vec::with_capacity(MAGIC_LEN);
    (&mut source)
        .take(MAGIC_LEN as u64)
        .read_to_end(&mut magic)
        .map_err(ReadError::from)?;

    let file_type = detect_file_type(&magic).ok_or(MetadataError::UnknownFormat)?;
    debug!(format = file_type.name(), "detected file type");

    let source = Cursor::new(magic).chain(source);
    match file_type {
        FileType::Jpeg => read_jpeg_metadata(source, options),
        FileType::Tiff | FileType::OlympusRaw | FileType::PanasonicRaw => {
            read_tiff_metadata(source, options)
        }
    }
}

/// Read metadata from an in-memory file. TIFF data is decoded without copying.
pub fn read_metadata_from_bytes(
    data: impl Into<Bytes>,
    options: &ExtractOptions,
) -> Result<Metadata, MetadataError> {
    let data = data.into();
    let file_type = detect_file_type(&data).ok_or(MetadataError::UnknownFormat)?;
    debug!(format = file_type.name(), len = data.len(), "detected file type");

    match file_type {
        FileType::Jpeg => {
            let mut reader = SequentialByteArrayReader::new(data);
            read_jpeg_from_reader(&mut reader, options)
        }
        FileType::Tiff | FileType::OlympusRaw | FileType::PanasonicRaw => {
            let mut reader = ByteArrayReader::new(data);
            read_tiff_from_reader(&mut reader, options)
        }
    }
}

pub fn read_metadata_from_path(
    path: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<Metadata, MetadataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(ReadError::from)?;
    debug!(path = %path.display(), "reading metadata");
    read_metadata_with(file, options)
}

/// Read metadata from a JPEG stream: frame header, comments and Exif.
pub fn read_jpeg_metadata<R: Read>(source: R, options: &ExtractOptions) -> Result<Metadata, MetadataError> {
    let mut reader = StreamReader::new(source);
    read_jpeg_from_reader(&mut reader, options)
}

/// Read metadata from a TIFF-structured stream (TIFF, ORF, RW2).
pub fn read_tiff_metadata<R: Read>(source: R, options: &ExtractOptions) -> Result<Metadata, MetadataError> {
    let mut reader = RandomAccessStreamReader::with_chunk_len(source, options.chunk_len);
    read_tiff_from_reader(&mut reader, options)
}

// =============================================================================
// Internals
// =============================================================================

fn read_jpeg_from_reader(
    reader: &mut dyn SequentialReader,
    options: &ExtractOptions,
) -> Result<Metadata, MetadataError> {
    let types = jpeg_metadata_segment_types();
    let segments = JpegSegmentReader::read_segments(reader, Some(types.as_slice()))?;
    Ok(process_jpeg_segments(&segments, options))
}

/// Decode already-collected JPEG segments.
///
/// Frame headers come first, then comments, then Exif, whatever their
/// order in the file.
pub fn process_jpeg_segments(segments: &JpegSegmentData, options: &ExtractOptions) -> Metadata {
    let mut metadata = Metadata::new();

    for frame_type in JpegSegmentType::FRAME_TYPES {
        for payload in segments.segments(frame_type) {
            metadata.add_directory(read_frame(frame_type, payload.clone()));
        }
    }

    for payload in segments.segments(JpegSegmentType::Com) {
        metadata.add_directory(read_comment(payload.clone()));
    }

    read_exif_segments(
        &options.tiff_reader(),
        segments.segments(JpegSegmentType::App1),
        &mut metadata,
        None,
    );

    metadata
}

fn read_tiff_from_reader(
    reader: &mut dyn RandomAccessReader,
    options: &ExtractOptions,
) -> Result<Metadata, MetadataError> {
    let mut metadata = Metadata::new();
    {
        let mut handler = ExifTiffHandler::new(&mut metadata, None);
        options.tiff_reader().process_tiff(reader, &mut handler, 0)?;
    }
    Ok(metadata)
}

// =============================================================================
// Tests
// =============================================================================
