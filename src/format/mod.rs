//! Container formats.
//!
//! - [`jpeg`]: marker segment scanning, frame headers, comments
//! - [`tiff`]: the generic IFD walker and its handler contract
//! - [`exif`]: the Exif interpretation of TIFF structures
//!
//! Use [`detect::detect_file_type`] to identify a file from its first bytes.

pub mod detect;
pub mod exif;
pub mod jpeg;
pub mod tiff;

pub use detect::{detect_file_type, FileType};
