//! JPEG container handling.
//!
//! A JPEG file is a sequence of marker segments:
//!
//! ```text
//! FF D8                          SOI
//! FF xx LL LL <LL-2 bytes>       segment, length includes itself
//! ...
//! FF DA ...                      SOS, entropy-coded data follows
//! ```
//!
//! [`JpegSegmentReader`] collects the segments before SOS into
//! [`JpegSegmentData`]. The frame header (SOFn) and comments (COM) are
//! decoded here; Exif APP1 payloads are handed to the TIFF decoder.

mod frame;
mod markers;
mod scanner;
mod segment_data;

pub use frame::{
    read_comment, read_frame, JpegComponent, JPEG_COMMENT_TAG_NAMES, JPEG_TAG_NAMES, TAG_COMMENT,
    TAG_COMPONENT_DATA_1, TAG_COMPRESSION_TYPE, TAG_DATA_PRECISION, TAG_IMAGE_HEIGHT,
    TAG_IMAGE_WIDTH, TAG_NUMBER_OF_COMPONENTS,
};
pub use markers::{JpegSegmentType, SOI};
pub use scanner::JpegSegmentReader;
pub use segment_data::JpegSegmentData;
