//! TIFF / IFD decoding.
//!
//! # Key Concepts
//!
//! - **Byte order**: the header declares it ("II" little-endian, "MM"
//!   big-endian). Individual IFDs written by careless editors may use the
//!   other order; the reader detects and handles this per IFD.
//!
//! - **IFD (Image File Directory)**: a count, that many 12-byte entries, and
//!   a link to the next IFD. Entries may point at further IFDs (Exif, GPS,
//!   MakerNotes).
//!
//! - **Inline vs offset values**: values of four bytes or fewer are stored in
//!   the entry; larger ones at an offset relative to the TIFF header.
//!
//! [`TiffReader`] walks the structure and reports it to a [`TiffHandler`];
//! [`DirectoryTiffHandler`] provides the directory bookkeeping handlers share.

mod data_format;
mod directory_handler;
mod handler;
mod reader;

pub use data_format::TiffDataFormat;
pub use directory_handler::DirectoryTiffHandler;
pub use handler::{CustomTag, IfdEntry, TiffHandler};
pub use reader::{process_tag, TiffReader, DEFAULT_MAX_FORMAT_ERRORS};
