use thiserror::Error;

/// Errors raised by the byte readers.
///
/// Malformed input routinely runs off the end of its buffer, so these are
/// ordinary values to be matched on, never panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// A read asked for bytes beyond the end of the available data
    #[error("End of data reached: requested {requested} bytes at index {index}, only {available} available")]
    EndOfData {
        index: u64,
        requested: u64,
        available: u64,
    },

    /// The underlying byte source failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        ReadError::Io(err.to_string())
    }
}

/// Errors that abort a JPEG segment scan
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JpegError {
    /// Stream does not begin with the SOI marker
    #[error("JPEG data is expected to begin with 0xFFD8, not 0x{0:04X}")]
    InvalidMagic(u16),

    /// Segment lengths are always big-endian; the reader was configured otherwise
    #[error("JPEG segments must be read in big-endian (Motorola) byte order")]
    NotBigEndian,

    /// Segment length field smaller than the two bytes it occupies
    #[error("JPEG segment size would be less than zero")]
    NegativeSegmentLength,

    /// Reader failure before any segment could be recognised
    #[error("Read error: {0}")]
    Read(#[from] ReadError),
}

/// Errors that abort TIFF processing as a whole.
///
/// Everything else found while walking IFDs is reported through the
/// handler and processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TiffError {
    /// Byte order bytes are neither "II" nor "MM"
    #[error("Unclear distinction between Motorola/Intel byte ordering: 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// The handler refused the marker following the byte order bytes
    #[error("Unexpected TIFF marker: 0x{0:04X}")]
    UnexpectedMarker(u16),

    /// The header itself could not be read
    #[error("Read error: {0}")]
    Read(#[from] ReadError),
}

/// Errors returned by the top-level extraction functions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// Input matches no supported magic bytes
    #[error("File format could not be determined")]
    UnknownFormat,

    #[error("JPEG error: {0}")]
    Jpeg(#[from] JpegError),

    #[error("TIFF error: {0}")]
    Tiff(#[from] TiffError),

    #[error("Read error: {0}")]
    Read(#[from] ReadError),
}

/// Errors from the `require_*` getters on a directory.
///
/// The two variants are kept apart so callers can tell an absent tag from
/// one holding a value of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("Tag '{tag}' has not been set in directory '{directory}'")]
    Missing { tag: String, directory: &'static str },

    #[error("Tag '{tag}' in directory '{directory}' cannot be converted: it holds {value_type}")]
    Unconvertible {
        tag: String,
        directory: &'static str,
        value_type: &'static str,
    },
}
