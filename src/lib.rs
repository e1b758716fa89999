//! # exif-probe
//!
//! Read Exif, TIFF and JPEG metadata from untrusted image files.
//!
//! The decoder never fails on damaged structures it can work around: bad
//! offsets, cyclic IFD chains, invalid format codes and truncated values are
//! recorded as errors on the directory being read, and everything decodable
//! is kept. Only input that is not recognisably JPEG or TIFF is rejected.
//!
//! ## Architecture
//!
//! - [`io`] - byte-order-aware sequential and random-access readers
//! - [`model`] - typed tag values, directories and the metadata container
//! - [`mod@format`] - JPEG segment scanning, the TIFF IFD walker and the Exif handler
//! - [`extract`] - format detection and the top-level `read_metadata*` functions
//! - [`report`] - serde views used by the `exif-probe` binary
//! - [`config`] - CLI types
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_probe::{read_metadata_from_path, DirectoryKind, ExtractOptions};
//!
//! let metadata = read_metadata_from_path("photo.jpg", &ExtractOptions::default())?;
//! if let Some(ifd0) = metadata.first_directory_of_kind(DirectoryKind::ExifIfd0) {
//!     println!("camera: {:?}", ifd0.get_string(0x010F));
//! }
//! for error in metadata.errors() {
//!     eprintln!("{error}");
//! }
//! # Ok::<(), exif_probe::MetadataError>(())
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod io;
pub mod model;
pub mod report;

// Re-export commonly used types
pub use error::{JpegError, MetadataError, ReadError, TagError, TiffError};
pub use extract::{
    process_jpeg_segments, read_jpeg_metadata, read_metadata, read_metadata_from_bytes,
    read_metadata_from_path, read_metadata_with, read_tiff_metadata, ExtractOptions,
};
pub use format::exif::ExifTiffHandler;
pub use format::jpeg::{JpegSegmentData, JpegSegmentReader, JpegSegmentType};
pub use format::tiff::{DirectoryTiffHandler, TiffDataFormat, TiffHandler, TiffReader};
pub use format::{detect_file_type, FileType};
pub use io::{
    ByteArrayReader, ByteOrder, RandomAccessReader, RandomAccessStreamReader,
    SequentialByteArrayReader, SequentialReader, StreamReader,
};
pub use model::{
    Charset, Directory, DirectoryId, DirectoryKind, Metadata, Rational, StringValue, Tag, TagValue,
};
