//! Raw string bytes with a deferred character set.
//!
//! Tag strings are stored exactly as found in the file. Decoding happens
//! only when text is requested, and callers may override the charset that
//! was recorded at decode time (Exif strings are frequently mislabelled).

use std::fmt;

use bytes::Bytes;

// =============================================================================
// Charset
// =============================================================================

/// Character sets understood by [`StringValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    /// 7-bit ASCII; bytes above 0x7F decode to U+FFFD
    Ascii,
    /// ISO-8859-1 (Latin-1); every byte maps to the code point of the same value
    Iso8859_1,
    Utf8,
    Utf16Be,
    Utf16Le,
}

impl Charset {
    /// Look up a charset by its IANA-style name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "ASCII" | "US-ASCII" => Some(Charset::Ascii),
            "ISO-8859-1" | "LATIN1" | "ISO8859-1" => Some(Charset::Iso8859_1),
            "UTF-8" | "UTF8" => Some(Charset::Utf8),
            "UTF-16BE" => Some(Charset::Utf16Be),
            "UTF-16LE" => Some(Charset::Utf16Le),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Charset::Ascii => "US-ASCII",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::Utf8 => "UTF-8",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
        }
    }

    /// Decode bytes to text. Invalid sequences become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Charset::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { '\u{FFFD}' })
                .collect(),
            Charset::Iso8859_1 => bytes.iter().map(|&b| b as char).collect(),
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Charset::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
        }
    }
}

fn decode_utf16(bytes: &[u8], assemble: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks_exact(2).map(|pair| assemble([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

// =============================================================================
// StringValue
// =============================================================================

/// String bytes as stored in the file, plus the charset they were tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringValue {
    bytes: Bytes,
    charset: Option<Charset>,
}

impl StringValue {
    pub fn new(bytes: impl Into<Bytes>, charset: Option<Charset>) -> Self {
        Self {
            bytes: bytes.into(),
            charset,
        }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn charset(&self) -> Option<Charset> {
        self.charset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode using `charset` if given, else the stored charset, else UTF-8.
    pub fn to_string_with(&self, charset: Option<Charset>) -> String {
        charset
            .or(self.charset)
            .unwrap_or(Charset::Utf8)
            .decode(&self.bytes)
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(None))
    }
}

impl From<&str> for StringValue {
    fn from(s: &str) -> Self {
        StringValue::new(Bytes::copy_from_slice(s.as_bytes()), Some(Charset::Utf8))
    }
}

// =============================================================================
// Tests
// =============================================================================
