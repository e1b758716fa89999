//! Test utilities for integration tests.
//!
//! Builders that lay out TIFF structures in either byte order and wrap them
//! in JPEG streams, so each test can describe just the entries it cares about.

use exif_probe::ByteOrder;

// =============================================================================
// TIFF File Builders
// =============================================================================

/// TIFF format codes used by the builders.
pub mod format {
    pub const BYTE: u16 = 1;
    pub const ASCII: u16 = 2;
    pub const SHORT: u16 = 3;
    pub const LONG: u16 = 4;
    pub const RATIONAL: u16 = 5;
    pub const UNDEFINED: u16 = 7;
    pub const SRATIONAL: u16 = 10;
}

/// Builder for TIFF data: a header followed by IFDs laid out in order.
///
/// IFD 0 is the one the header points at. Other IFDs are only reached
/// through [`IfdBuilder::pointer`] entries or [`IfdBuilder::next`] links.
pub struct TiffBuilder {
    byte_order: ByteOrder,
    marker: u16,
    ifds: Vec<IfdBuilder>,
}

impl TiffBuilder {
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            marker: 0x002A,
            ifds: Vec::new(),
        }
    }

    pub fn with_marker(mut self, marker: u16) -> Self {
        self.marker = marker;
        self
    }

    pub fn add_ifd(mut self, ifd: IfdBuilder) -> Self {
        self.ifds.push(ifd);
        self
    }

    /// Build the TIFF file data.
    pub fn build(self) -> Vec<u8> {
        let order = self.byte_order;

        // Each IFD is followed directly by the values that do not fit inline
        let mut ifd_offsets = Vec::with_capacity(self.ifds.len());
        let mut offset = 8usize;
        for ifd in &self.ifds {
            ifd_offsets.push(offset);
            offset += ifd.table_len() + ifd.external_len(order);
        }

        let mut data = Vec::with_capacity(offset);
        match order {
            ByteOrder::LittleEndian => data.extend_from_slice(b"II"),
            ByteOrder::BigEndian => data.extend_from_slice(b"MM"),
        }
        put_u16(&mut data, order, self.marker);
        put_u32(&mut data, order, ifd_offsets.first().map_or(8, |&o| o as u32));

        for (ifd, &ifd_offset) in self.ifds.iter().zip(&ifd_offsets) {
            ifd.write_to(&mut data, order, ifd_offset, &ifd_offsets);
        }

        data
    }
}

/// One entry's payload, encoded at build time in the file's byte order.
#[derive(Clone)]
enum EntryData {
    Bytes(Vec<u8>),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Rationals(Vec<(u32, u32)>),
    /// LONG pointer to another IFD in the builder
    Pointer(usize),
    /// Raw value field, with no data behind it
    RawField(u32),
}

#[derive(Clone)]
struct EntryBuilder {
    tag: u16,
    format: u16,
    count: u32,
    data: EntryData,
}

impl EntryBuilder {
    fn encode(&self, order: ByteOrder, ifd_offsets: &[usize]) -> Vec<u8> {
        let mut out = Vec::new();
        match &self.data {
            EntryData::Bytes(bytes) => out.extend_from_slice(bytes),
            EntryData::Shorts(values) => values.iter().for_each(|&v| put_u16(&mut out, order, v)),
            EntryData::Longs(values) => values.iter().for_each(|&v| put_u32(&mut out, order, v)),
            EntryData::Rationals(values) => values.iter().for_each(|&(n, d)| {
                put_u32(&mut out, order, n);
                put_u32(&mut out, order, d);
            }),
            EntryData::Pointer(index) => {
                let target = ifd_offsets.get(*index).copied().unwrap_or(0);
                put_u32(&mut out, order, target as u32);
            }
            EntryData::RawField(value) => put_u32(&mut out, order, *value),
        }
        out
    }

    fn is_external(&self, order: ByteOrder) -> bool {
        !matches!(self.data, EntryData::RawField(_)) && self.encode(order, &[]).len() > 4
    }
}

/// Builder for one IFD.
#[derive(Clone, Default)]
pub struct IfdBuilder {
    entries: Vec<EntryBuilder>,
    next: Option<usize>,
    raw_next: Option<u32>,
}

impl IfdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, tag: u16, format: u16, count: u32, data: EntryData) -> Self {
        self.entries.push(EntryBuilder {
            tag,
            format,
            count,
            data,
        });
        self
    }

    /// NUL-terminated ASCII value.
    pub fn ascii(self, tag: u16, value: &str) -> Self {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        let count = bytes.len() as u32;
        self.push(tag, format::ASCII, count, EntryData::Bytes(bytes))
    }

    pub fn short(self, tag: u16, value: u16) -> Self {
        self.shorts(tag, &[value])
    }

    pub fn shorts(self, tag: u16, values: &[u16]) -> Self {
        self.push(tag, format::SHORT, values.len() as u32, EntryData::Shorts(values.to_vec()))
    }

    pub fn long(self, tag: u16, value: u32) -> Self {
        self.push(tag, format::LONG, 1, EntryData::Longs(vec![value]))
    }

    pub fn rational(self, tag: u16, numerator: u32, denominator: u32) -> Self {
        self.push(
            tag,
            format::RATIONAL,
            1,
            EntryData::Rationals(vec![(numerator, denominator)]),
        )
    }

    pub fn srational(self, tag: u16, numerator: i32, denominator: i32) -> Self {
        self.push(
            tag,
            format::SRATIONAL,
            1,
            EntryData::Rationals(vec![(numerator as u32, denominator as u32)]),
        )
    }

    pub fn bytes(self, tag: u16, format: u16, bytes: &[u8]) -> Self {
        self.push(tag, format, bytes.len() as u32, EntryData::Bytes(bytes.to_vec()))
    }

    pub fn undefined(self, tag: u16, bytes: &[u8]) -> Self {
        self.bytes(tag, format::UNDEFINED, bytes)
    }

    /// LONG entry holding the offset of IFD `index`.
    pub fn pointer(self, tag: u16, index: usize) -> Self {
        self.push(tag, format::LONG, 1, EntryData::Pointer(index))
    }

    /// Entry with an arbitrary header and value field, for malformed input.
    pub fn raw(self, tag: u16, format: u16, count: u32, value_field: u32) -> Self {
        self.push(tag, format, count, EntryData::RawField(value_field))
    }

    /// Chain IFD `index` after this one.
    pub fn next(mut self, index: usize) -> Self {
        self.next = Some(index);
        self
    }

    /// Write an arbitrary next-IFD offset.
    pub fn raw_next(mut self, offset: u32) -> Self {
        self.raw_next = Some(offset);
        self
    }

    fn table_len(&self) -> usize {
        2 + 12 * self.entries.len() + 4
    }

    fn external_len(&self, order: ByteOrder) -> usize {
        self.entries
            .iter()
            .filter(|e| e.is_external(order))
            .map(|e| e.encode(order, &[]).len())
            .sum()
    }

    fn write_to(&self, data: &mut Vec<u8>, order: ByteOrder, ifd_offset: usize, ifd_offsets: &[usize]) {
        assert_eq!(data.len(), ifd_offset);

        let mut external = Vec::new();
        let external_start = ifd_offset + self.table_len();

        put_u16(data, order, self.entries.len() as u16);
        for entry in &self.entries {
            put_u16(data, order, entry.tag);
            put_u16(data, order, entry.format);
            put_u32(data, order, entry.count);

            let encoded = entry.encode(order, ifd_offsets);
            if entry.is_external(order) {
                put_u32(data, order, (external_start + external.len()) as u32);
                external.extend_from_slice(&encoded);
            } else {
                let mut field = encoded;
                field.resize(4, 0);
                data.extend_from_slice(&field);
            }
        }

        let next = match (self.raw_next, self.next) {
            (Some(raw), _) => raw,
            (None, Some(index)) => ifd_offsets.get(index).copied().unwrap_or(0) as u32,
            (None, None) => 0,
        };
        put_u32(data, order, next);
        data.extend_from_slice(&external);
    }
}

/// Encode a standalone IFD of LONG entries, as embedded in MakerNotes.
pub fn inline_long_ifd(order: ByteOrder, entries: &[(u16, u32)]) -> Vec<u8> {
    let mut data = Vec::new();
    put_u16(&mut data, order, entries.len() as u16);
    for &(tag, value) in entries {
        put_u16(&mut data, order, tag);
        put_u16(&mut data, order, format::LONG);
        put_u32(&mut data, order, 1);
        put_u32(&mut data, order, value);
    }
    put_u32(&mut data, order, 0);
    data
}

pub fn put_u16(data: &mut Vec<u8>, order: ByteOrder, value: u16) {
    match order {
        ByteOrder::LittleEndian => data.extend_from_slice(&value.to_le_bytes()),
        ByteOrder::BigEndian => data.extend_from_slice(&value.to_be_bytes()),
    }
}

pub fn put_u32(data: &mut Vec<u8>, order: ByteOrder, value: u32) {
    match order {
        ByteOrder::LittleEndian => data.extend_from_slice(&value.to_le_bytes()),
        ByteOrder::BigEndian => data.extend_from_slice(&value.to_be_bytes()),
    }
}

// =============================================================================
// JPEG Builders
// =============================================================================

/// Builder for JPEG streams holding only marker segments.
#[derive(Default)]
pub struct JpegBuilder {
    segments: Vec<(u8, Vec<u8>)>,
    scan: bool,
}

impl JpegBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment(mut self, marker: u8, payload: &[u8]) -> Self {
        self.segments.push((marker, payload.to_vec()));
        self
    }

    /// SOF segment with 8-bit precision and the given component ids.
    pub fn frame(self, marker: u8, height: u16, width: u16, components: &[u8]) -> Self {
        let mut payload = vec![8];
        payload.extend_from_slice(&height.to_be_bytes());
        payload.extend_from_slice(&width.to_be_bytes());
        payload.push(components.len() as u8);
        for (i, &id) in components.iter().enumerate() {
            let sampling = if i == 0 { 0x22 } else { 0x11 };
            let table = if i == 0 { 0 } else { 1 };
            payload.extend_from_slice(&[id, sampling, table]);
        }
        self.segment(marker, &payload)
    }

    pub fn comment(self, text: &str) -> Self {
        self.segment(0xFE, text.as_bytes())
    }

    /// APP1 segment with the Exif preamble in front of `tiff`.
    pub fn exif(self, tiff: &[u8]) -> Self {
        let mut payload = b"Exif\0\0".to_vec();
        payload.extend_from_slice(tiff);
        self.segment(0xE1, &payload)
    }

    /// Append SOS with a few bytes of entropy-coded data before EOI.
    pub fn with_scan(mut self) -> Self {
        self.scan = true;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];
        for (marker, payload) in self.segments {
            data.extend_from_slice(&[0xFF, marker]);
            data.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
            data.extend_from_slice(&payload);
        }
        if self.scan {
            data.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0x12, 0x34, 0xFF, 0x00, 0x56]);
        }
        data.extend_from_slice(&[0xFF, 0xD9]);
        data
    }
}

/// A small camera-like TIFF: IFD0 with Make/Model and an Exif SubIFD.
pub fn camera_tiff(order: ByteOrder) -> Vec<u8> {
    TiffBuilder::new(order)
        .add_ifd(
            IfdBuilder::new()
                .ascii(0x010F, "Canon")
                .ascii(0x0110, "Canon EOS 5D")
                .short(0x0112, 1)
                .pointer(0x8769, 1),
        )
        .add_ifd(
            IfdBuilder::new()
                .rational(0x829A, 1, 200)
                .rational(0x829D, 28, 10)
                .ascii(0x9003, "2024:05:01 12:30:45"),
        )
        .build()
}
