//! TIFF and Exif integration tests.
//!
//! Tests verify:
//! - Both byte orders decode to the same metadata
//! - Exif, GPS, Interoperability and MakerNote IFDs land in their own directories
//! - Cyclic IFD chains terminate
//! - Corrupt entries are reported and skipped without losing their neighbours

use std::io::Cursor;

use proptest::prelude::*;

use exif_probe::report::MetadataReport;
use exif_probe::{
    read_metadata_from_bytes, read_tiff_metadata, ByteArrayReader, ByteOrder, Directory,
    DirectoryKind, ExtractOptions, MetadataError, RandomAccessReader, Rational,
    SequentialByteArrayReader, SequentialReader, TagValue, TiffError,
};

use super::test_utils::{camera_tiff, format, inline_long_ifd, IfdBuilder, TiffBuilder};

fn decode(data: Vec<u8>) -> exif_probe::Metadata {
    read_metadata_from_bytes(data, &ExtractOptions::default()).unwrap()
}

fn kinds(metadata: &exif_probe::Metadata) -> Vec<DirectoryKind> {
    metadata.directories().iter().map(Directory::kind).collect()
}

// =============================================================================
// Byte Order Tests
// =============================================================================

proptest! {
    #[test]
    fn test_random_access_endianness_symmetry(a in any::<u16>(), b in any::<u32>(), c in any::<u64>()) {
        let mut big = Vec::new();
        big.extend_from_slice(&a.to_be_bytes());
        big.extend_from_slice(&b.to_be_bytes());
        big.extend_from_slice(&c.to_be_bytes());

        let mut little = Vec::new();
        little.extend_from_slice(&a.to_le_bytes());
        little.extend_from_slice(&b.to_le_bytes());
        little.extend_from_slice(&c.to_le_bytes());

        let mut be = ByteArrayReader::new(big);
        let mut le = ByteArrayReader::new(little);
        le.set_byte_order(ByteOrder::LittleEndian);

        prop_assert_eq!(be.get_u16(0).unwrap(), a);
        prop_assert_eq!(le.get_u16(0).unwrap(), a);
        prop_assert_eq!(be.get_u32(2).unwrap(), b);
        prop_assert_eq!(le.get_u32(2).unwrap(), b);
        prop_assert_eq!(be.get_i64(6).unwrap() as u64, c);
        prop_assert_eq!(le.get_i64(6).unwrap() as u64, c);
    }

    #[test]
    fn test_sequential_endianness_symmetry(a in any::<u16>(), b in any::<u32>(), c in any::<u64>()) {
        let mut little = Vec::new();
        little.extend_from_slice(&a.to_le_bytes());
        little.extend_from_slice(&b.to_le_bytes());
        little.extend_from_slice(&c.to_le_bytes());

        let mut le = SequentialByteArrayReader::new(little);
        le.set_byte_order(ByteOrder::LittleEndian);
        prop_assert_eq!(le.get_u16().unwrap(), a);
        prop_assert_eq!(le.get_u32().unwrap(), b);
        prop_assert_eq!(le.get_i64().unwrap() as u64, c);
    }
}

#[test]
fn test_both_byte_orders_decode_alike() {
    let big = decode(camera_tiff(ByteOrder::BigEndian));
    let little = decode(camera_tiff(ByteOrder::LittleEndian));

    assert_eq!(
        MetadataReport::from_metadata(&big),
        MetadataReport::from_metadata(&little)
    );
    assert_eq!(kinds(&big), vec![DirectoryKind::ExifIfd0, DirectoryKind::ExifSubIfd]);
}

#[test]
fn test_stream_matches_in_memory() {
    let data = camera_tiff(ByteOrder::LittleEndian);
    let options = ExtractOptions {
        chunk_len: 16,
        ..ExtractOptions::default()
    };

    let streamed = read_tiff_metadata(Cursor::new(data.clone()), &options).unwrap();
    let in_memory = decode(data);
    assert_eq!(
        MetadataReport::from_metadata(&streamed),
        MetadataReport::from_metadata(&in_memory)
    );
}

// =============================================================================
// Directory Structure Tests
// =============================================================================

#[test]
fn test_exif_gps_and_interop_directories() {
    let data = TiffBuilder::new(ByteOrder::BigEndian)
        .add_ifd(
            IfdBuilder::new()
                .ascii(0x010F, "NIKON CORPORATION")
                .pointer(0x8769, 1)
                .pointer(0x8825, 2),
        )
        .add_ifd(
            IfdBuilder::new()
                .rational(0x829A, 1, 200)
                .srational(0x9204, -1, 3)
                .pointer(0xA005, 3),
        )
        .add_ifd(
            IfdBuilder::new()
                .bytes(0x0000, format::BYTE, &[2, 3, 0, 0])
                .ascii(0x0001, "N")
                .rational(0x0006, 1234, 10),
        )
        .add_ifd(IfdBuilder::new().ascii(0x0001, "R98"))
        .build();

    let metadata = decode(data);
    assert_eq!(
        kinds(&metadata),
        vec![
            DirectoryKind::ExifIfd0,
            DirectoryKind::ExifSubIfd,
            DirectoryKind::ExifInterop,
            DirectoryKind::Gps,
        ]
    );
    assert!(!metadata.has_errors());

    let ids: Vec<_> = metadata.iter().map(|(id, _)| id).collect();
    let sub = &metadata.directories()[1];
    let interop = &metadata.directories()[2];
    let gps = &metadata.directories()[3];
    assert_eq!(sub.parent(), Some(ids[0]));
    assert_eq!(interop.parent(), Some(ids[1]));
    assert_eq!(gps.parent(), Some(ids[0]));

    assert_eq!(sub.get_rational(0x829A), Some(Rational::new(1, 200)));
    assert_eq!(sub.get_rational(0x9204), Some(Rational::new(-1, 3)));
    assert_eq!(sub.tag_name(0x829A), "Exposure Time");
    assert_eq!(gps.get_int_array(0x0000), Some(vec![2, 3, 0, 0]));
    assert_eq!(gps.get_string(0x0001).as_deref(), Some("N"));
    assert_eq!(gps.get_double(0x0006), Some(123.4));
    assert_eq!(interop.get_string(0x0001).as_deref(), Some("R98"));
}

#[test]
fn test_thumbnail_follower() {
    let data = TiffBuilder::new(ByteOrder::LittleEndian)
        .add_ifd(IfdBuilder::new().ascii(0x010F, "Sony").next(1))
        .add_ifd(IfdBuilder::new().short(0x0103, 6).long(0x0201, 4096))
        .build();

    let metadata = decode(data);
    assert_eq!(
        kinds(&metadata),
        vec![DirectoryKind::ExifIfd0, DirectoryKind::ExifThumbnail]
    );
    let thumbnail = &metadata.directories()[1];
    assert_eq!(thumbnail.get_int(0x0103), Some(6));
    assert_eq!(thumbnail.get_long(0x0201), Some(4096));
}

#[test]
fn test_page_number_makes_image_follower() {
    let data = TiffBuilder::new(ByteOrder::BigEndian)
        .add_ifd(IfdBuilder::new().shorts(0x0129, &[0, 2]).next(1))
        .add_ifd(IfdBuilder::new().shorts(0x0129, &[1, 2]))
        .build();

    let metadata = decode(data);
    assert_eq!(
        kinds(&metadata),
        vec![DirectoryKind::ExifIfd0, DirectoryKind::ExifImage]
    );
}

#[test]
fn test_raw_markers() {
    let orf = TiffBuilder::new(ByteOrder::LittleEndian)
        .with_marker(0x4F52)
        .add_ifd(IfdBuilder::new().ascii(0x010F, "OLYMPUS"))
        .build();
    assert_eq!(kinds(&decode(orf)), vec![DirectoryKind::ExifIfd0]);

    let rw2 = TiffBuilder::new(ByteOrder::LittleEndian)
        .with_marker(0x0055)
        .add_ifd(IfdBuilder::new().ascii(0x010F, "Panasonic").pointer(0x8769, 1))
        .add_ifd(IfdBuilder::new().rational(0x829A, 1, 60))
        .build();
    assert_eq!(
        kinds(&decode(rw2)),
        vec![DirectoryKind::PanasonicRawIfd0, DirectoryKind::ExifSubIfd]
    );
}

#[test]
fn test_header_errors_fail_bare_tiff() {
    let options = ExtractOptions::default();

    let err = read_tiff_metadata(Cursor::new(b"XX\x00\x2A\x00\x00\x00\x08".to_vec()), &options).unwrap_err();
    assert_eq!(err, MetadataError::Tiff(TiffError::InvalidByteOrder(0x5858)));

    let err = read_tiff_metadata(Cursor::new(b"MM\x12\x34\x00\x00\x00\x08".to_vec()), &options).unwrap_err();
    assert_eq!(err, MetadataError::Tiff(TiffError::UnexpectedMarker(0x1234)));
}

// =============================================================================
// MakerNote Tests
// =============================================================================

fn tiff_with_makernote(order: ByteOrder, make: &str, makernote: &[u8]) -> Vec<u8> {
    TiffBuilder::new(order)
        .add_ifd(IfdBuilder::new().ascii(0x010F, make).pointer(0x8769, 1))
        .add_ifd(IfdBuilder::new().undefined(0x927C, makernote))
        .build()
}

#[test]
fn test_canon_makernote_is_walked() {
    for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
        let makernote = inline_long_ifd(order, &[(0x0001, 42), (0x0010, 0x8000_0001)]);
        let metadata = decode(tiff_with_makernote(order, "Canon", &makernote));

        let canon = metadata
            .first_directory_of_kind(DirectoryKind::CanonMakernote)
            .unwrap();
        assert_eq!(canon.get_long(0x0001), Some(42));
        assert_eq!(canon.get_long(0x0010), Some(0x8000_0001));

        let sub = metadata.first_directory_of_kind(DirectoryKind::ExifSubIfd).unwrap();
        assert!(!sub.contains_tag(0x927C));
    }
}

#[test]
fn test_nikon_type1_makernote_is_walked() {
    let order = ByteOrder::BigEndian;
    let mut makernote = b"Nikon\0\x01\0".to_vec();
    makernote.extend(inline_long_ifd(order, &[(0x0003, 7)]));

    let metadata = decode(tiff_with_makernote(order, "NIKON", &makernote));
    let nikon = metadata
        .first_directory_of_kind(DirectoryKind::NikonType1Makernote)
        .unwrap();
    assert_eq!(nikon.get_long(0x0003), Some(7));
}

#[test]
fn test_unsupported_nikon_makernote_reported() {
    let mut makernote = b"Nikon\0\x02\x10\0\0".to_vec();
    makernote.extend_from_slice(&[0u8; 16]);

    let metadata = decode(tiff_with_makernote(ByteOrder::BigEndian, "NIKON", &makernote));
    let sub = metadata.first_directory_of_kind(DirectoryKind::ExifSubIfd).unwrap();
    assert_eq!(sub.errors(), ["Unsupported Nikon makernote data ignored.".to_string()]);
    assert!(!sub.contains_tag(0x927C));
    assert!(!metadata.contains_directory_of_kind(DirectoryKind::NikonType1Makernote));
}

#[test]
fn test_unknown_makernote_stored_raw() {
    let makernote = b"SONY DSC \0\0\0\x01\x02";
    let metadata = decode(tiff_with_makernote(ByteOrder::LittleEndian, "SONY", makernote));

    let sub = metadata.first_directory_of_kind(DirectoryKind::ExifSubIfd).unwrap();
    assert_eq!(sub.get_byte_array(0x927C), Some(makernote.to_vec()));
}

// =============================================================================
// Corrupt Structure Tests
// =============================================================================

#[test]
fn test_self_referencing_ifd_terminates() {
    let data = TiffBuilder::new(ByteOrder::BigEndian)
        .add_ifd(IfdBuilder::new().ascii(0x010F, "Loop").next(0))
        .build();

    let metadata = decode(data);
    assert_eq!(kinds(&metadata), vec![DirectoryKind::ExifIfd0]);
    assert_eq!(metadata.directories()[0].tag_count(), 1);
}

#[test]
fn test_backward_next_ifd_ends_chain() {
    // Offset 10 lies inside IFD0's table and has never been walked
    let data = TiffBuilder::new(ByteOrder::BigEndian)
        .add_ifd(IfdBuilder::new().ascii(0x010F, "Nikon").next(1))
        .add_ifd(IfdBuilder::new().short(0x0103, 6).raw_next(10))
        .build();

    let metadata = decode(data);
    assert_eq!(
        kinds(&metadata),
        vec![DirectoryKind::ExifIfd0, DirectoryKind::ExifThumbnail]
    );
    assert!(!metadata.has_errors());
    assert_eq!(metadata.directories()[1].get_int(0x0103), Some(6));
}

#[test]
fn test_out_of_bounds_next_ifd_ends_chain() {
    let data = TiffBuilder::new(ByteOrder::LittleEndian)
        .add_ifd(IfdBuilder::new().ascii(0x010F, "Nikon").next(1))
        .add_ifd(IfdBuilder::new().short(0x0103, 6).raw_next(0xFFFF_FF00))
        .build();

    let metadata = decode(data);
    assert_eq!(
        kinds(&metadata),
        vec![DirectoryKind::ExifIfd0, DirectoryKind::ExifThumbnail]
    );
    assert!(!metadata.has_errors());
}

#[test]
fn test_sub_ifd_pointing_at_ancestor_terminates() {
    let data = TiffBuilder::new(ByteOrder::LittleEndian)
        .add_ifd(IfdBuilder::new().ascii(0x010F, "Loop").pointer(0x8769, 1))
        .add_ifd(IfdBuilder::new().pointer(0x014A, 0))
        .build();

    let metadata = decode(data);
    assert_eq!(metadata.directories_of_kind(DirectoryKind::ExifIfd0).count(), 1);
    let ifd0 = metadata.first_directory_of_kind(DirectoryKind::ExifIfd0).unwrap();
    assert_eq!(ifd0.get_string(0x010F).as_deref(), Some("Loop"));
}

#[test]
fn test_overflowing_entry_skipped() {
    let data = TiffBuilder::new(ByteOrder::BigEndian)
        .add_ifd(
            IfdBuilder::new()
                .ascii(0x010F, "Sony")
                .raw(0x0110, format::ASCII, 100, 0xFFFF_FF00)
                .short(0x0112, 6),
        )
        .build();

    let metadata = decode(data);
    let ifd0 = &metadata.directories()[0];
    assert_eq!(ifd0.errors(), ["Illegal TIFF tag pointer offset".to_string()]);
    assert_eq!(ifd0.get_string(0x010F).as_deref(), Some("Sony"));
    assert_eq!(ifd0.get_int(0x0112), Some(6));
    assert!(!ifd0.contains_tag(0x0110));
}

#[test]
fn test_format_error_cap() {
    let mut ifd = IfdBuilder::new();
    for tag in 0x1000..0x1007u16 {
        ifd = ifd.raw(tag, 99, 1, 0);
    }
    let data = TiffBuilder::new(ByteOrder::LittleEndian)
        .add_ifd(ifd.ascii(0x010F, "Late"))
        .build();

    let metadata = decode(data.clone());
    let ifd0 = &metadata.directories()[0];
    assert_eq!(ifd0.errors().len(), 7);
    assert_eq!(ifd0.errors()[0], "Invalid TIFF tag format code 99 for tag 0x1000");
    assert_eq!(
        ifd0.errors()[6],
        "Stopping processing as too many errors seen in TIFF IFD"
    );
    assert!(!ifd0.contains_tag(0x010F));

    let lenient = ExtractOptions {
        max_format_errors: 10,
        ..ExtractOptions::default()
    };
    let metadata = read_metadata_from_bytes(data, &lenient).unwrap();
    let ifd0 = &metadata.directories()[0];
    assert_eq!(ifd0.errors().len(), 7);
    assert_eq!(ifd0.get_string(0x010F).as_deref(), Some("Late"));
}

#[test]
fn test_illegally_sized_ifd() {
    // 64 entries declared, none present
    let data = vec![
        0x4D, 0x4D, 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08, 0x00, 0x40, 0x00, 0x00,
    ];
    let metadata = decode(data);
    assert_eq!(kinds(&metadata), vec![DirectoryKind::ExifIfd0]);
    assert_eq!(metadata.directories()[0].errors(), ["Illegally sized IFD".to_string()]);
}

#[test]
fn test_first_ifd_offset_past_end_falls_back() {
    let mut data = TiffBuilder::new(ByteOrder::BigEndian)
        .add_ifd(IfdBuilder::new().ascii(0x010F, "Fallback"))
        .build();
    data[4..8].copy_from_slice(&0x0000_FFFFu32.to_be_bytes());

    let metadata = decode(data);
    let ifd0 = &metadata.directories()[0];
    assert_eq!(ifd0.get_string(0x010F).as_deref(), Some("Fallback"));
    assert!(ifd0.errors()[0].starts_with("First IFD offset is beyond the end"));
}

// =============================================================================
// Value Coercion Tests
// =============================================================================

#[test]
fn test_single_element_arrays_coerce() {
    let mut directory = Directory::new(DirectoryKind::ExifIfd0);
    directory.set_value(1, vec![42i32]);
    directory.set_value(2, vec![Rational::new(10, 2)]);
    directory.set_value(3, vec![1i32, 2]);

    assert_eq!(directory.get_int(1), Some(42));
    assert_eq!(directory.get_int(2), Some(5));
    assert_eq!(directory.get_int(3), None);
    assert!(matches!(directory.get_value(1), Some(TagValue::IntArray(_))));
}
