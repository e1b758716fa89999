//! JPEG segment scanner.
//!
//! Walks the marker segments at the head of a JPEG stream, up to the first
//! Start Of Scan, collecting payloads without interpreting them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::error::{JpegError, ReadError};
use crate::io::{SequentialReader, StreamReader};

use super::{JpegSegmentData, JpegSegmentType, SOI};

/// Reads JPEG marker segments.
pub struct JpegSegmentReader;

impl JpegSegmentReader {
    /// Collect segment payloads from a big-endian reader positioned at SOI.
    ///
    /// With `types == None` every segment is kept; otherwise only the listed
    /// types are read and the rest are skipped. The scan stops at SOS or EOI,
    /// when a skip runs past the end of the data, or when the data ends while
    /// looking for a marker. In each case the segments gathered so far are
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`JpegError::NotBigEndian`] if the reader is little-endian
    /// - [`JpegError::InvalidMagic`] if the stream does not start with `FF D8`
    /// - [`JpegError::NegativeSegmentLength`] for a length field below 2
    /// - [`JpegError::Read`] if the underlying source fails
    pub fn read_segments<R: SequentialReader + ?Sized>(
        reader: &mut R,
        types: Option<&[JpegSegmentType]>,
    ) -> Result<JpegSegmentData, JpegError> {
        if !reader.is_motorola_byte_order() {
            return Err(JpegError::NotBigEndian);
        }

        let magic = reader.get_u16()?;
        if magic != SOI {
            return Err(JpegError::InvalidMagic(magic));
        }

        let mut data = JpegSegmentData::new();
        match Self::scan(reader, types, &mut data) {
            Ok(()) => Ok(data),
            Err(JpegError::Read(ReadError::EndOfData { .. })) => {
                debug!(
                    position = reader.position(),
                    "JPEG data ended before SOS or EOI"
                );
                Ok(data)
            }
            Err(e) => Err(e),
        }
    }

    fn scan<R: SequentialReader + ?Sized>(
        reader: &mut R,
        types: Option<&[JpegSegmentType]>,
        data: &mut JpegSegmentData,
    ) -> Result<(), JpegError> {
        loop {
            let marker = Self::next_marker(reader)?;

            if marker == JpegSegmentType::Sos.as_u8() || marker == JpegSegmentType::Eoi.as_u8() {
                trace!(marker = format_args!("0x{marker:02X}"), "end of JPEG segments");
                return Ok(());
            }

            let length = i64::from(reader.get_u16()?) - 2;
            if length < 0 {
                return Err(JpegError::NegativeSegmentLength);
            }

            let wanted = match types {
                None => true,
                Some(types) => types.iter().any(|t| t.as_u8() == marker),
            };

            if wanted {
                let payload = reader.get_bytes(length as usize)?;
                trace!(
                    marker = format_args!("0x{marker:02X}"),
                    len = payload.len(),
                    "read JPEG segment"
                );
                data.add_segment(marker, payload);
            } else if !reader.try_skip(length as u64) {
                warn!(
                    marker = format_args!("0x{marker:02X}"),
                    length, "JPEG segment extends past end of data"
                );
                return Ok(());
            }
        }
    }

    /// Find `0xFF` followed by a byte that is neither `0x00` nor `0xFF`.
    fn next_marker<R: SequentialReader + ?Sized>(reader: &mut R) -> Result<u8, JpegError> {
        let mut identifier = reader.get_u8()?;
        let mut marker = reader.get_u8()?;
        while identifier != 0xFF || marker == 0xFF || marker == 0x00 {
            identifier = marker;
            marker = reader.get_u8()?;
        }
        Ok(marker)
    }

    /// Scan a byte source of any kind.
    pub fn read_segments_from<R: Read>(
        source: R,
        types: Option<&[JpegSegmentType]>,
    ) -> Result<JpegSegmentData, JpegError> {
        let mut reader = StreamReader::new(source);
        Self::read_segments(&mut reader, types)
    }

    /// Scan a JPEG file on disk.
    pub fn read_segments_from_path(
        path: impl AsRef<Path>,
        types: Option<&[JpegSegmentType]>,
    ) -> Result<JpegSegmentData, JpegError> {
        let file = File::open(path.as_ref()).map_err(ReadError::from)?;
        Self::read_segments_from(file, types)
    }
}

// =============================================================================
// Tests
// =============================================================================
