//! JPEG integration tests.
//!
//! Tests verify:
//! - Segment scanning stops at SOS/EOI and tolerates truncation
//! - Repeated segments keep file order
//! - Frame, comment and Exif segments become directories in a fixed order
//! - A broken Exif block is reported without failing the file

use std::io::Cursor;

use exif_probe::format::jpeg::{TAG_COMMENT, TAG_IMAGE_HEIGHT, TAG_IMAGE_WIDTH, TAG_NUMBER_OF_COMPONENTS};
use exif_probe::{
    read_metadata, read_metadata_from_bytes, ByteOrder, DirectoryKind, ExtractOptions, JpegError,
    JpegSegmentReader, JpegSegmentType, MetadataError,
};

use super::test_utils::{camera_tiff, JpegBuilder};

// =============================================================================
// Segment Scanning Tests
// =============================================================================

#[test]
fn test_scan_single_app1() {
    let data = [0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x04, 0xAB, 0xCD, 0xFF, 0xD9];
    let segments = JpegSegmentReader::read_segments_from(Cursor::new(data), None).unwrap();

    assert_eq!(segments.segment_types(), vec![JpegSegmentType::App1]);
    assert_eq!(segments.segment_count(JpegSegmentType::App1), 1);
    assert_eq!(
        segments.segment(JpegSegmentType::App1, 0).map(|b| b.to_vec()),
        Some(vec![0xAB, 0xCD])
    );
}

#[test]
fn test_repeated_segments_keep_order() {
    let data = JpegBuilder::new()
        .segment(0xE2, b"first")
        .segment(0xE1, b"exif?")
        .segment(0xE2, b"second")
        .segment(0xE2, b"third")
        .build();

    let segments = JpegSegmentReader::read_segments_from(Cursor::new(data), None).unwrap();
    let app2: Vec<&[u8]> = segments
        .segments(JpegSegmentType::App2)
        .iter()
        .map(|b| b.as_ref())
        .collect();
    assert_eq!(app2, vec![&b"first"[..], &b"second"[..], &b"third"[..]]);
}

#[test]
fn test_two_comments_by_index() {
    let data = JpegBuilder::new().comment("one").comment("two").build();
    let segments = JpegSegmentReader::read_segments_from(Cursor::new(data), None).unwrap();

    assert_eq!(segments.segment_count(JpegSegmentType::Com), 2);
    assert_eq!(
        segments.segment(JpegSegmentType::Com, 0).map(|b| b.to_vec()),
        Some(b"one".to_vec())
    );
    assert_eq!(
        segments.segment(JpegSegmentType::Com, 1).map(|b| b.to_vec()),
        Some(b"two".to_vec())
    );
    assert!(segments.segment(JpegSegmentType::Com, 2).is_none());
}

#[test]
fn test_scan_stops_at_sos() {
    let mut data = JpegBuilder::new().segment(0xE0, b"JFIF\0").with_scan().build();
    // Anything after SOS is image data, even if it looks like a marker
    data.truncate(data.len() - 2);
    data.extend_from_slice(&[0xFF, 0xE1, 0x00, 0x04, 0x01, 0x02, 0xFF, 0xD9]);

    let segments = JpegSegmentReader::read_segments_from(Cursor::new(data), None).unwrap();
    assert!(segments.contains_segment(JpegSegmentType::App0));
    assert!(!segments.contains_segment(JpegSegmentType::App1));
}

#[test]
fn test_type_filter() {
    let data = JpegBuilder::new()
        .segment(0xE0, b"JFIF\0")
        .comment("kept")
        .segment(0xDB, &[0u8; 65])
        .build();

    let wanted = [JpegSegmentType::Com];
    let segments = JpegSegmentReader::read_segments_from(Cursor::new(data), Some(&wanted[..])).unwrap();
    assert_eq!(segments.segment_types(), vec![JpegSegmentType::Com]);
}

#[test]
fn test_truncated_stream_keeps_collected_segments() {
    let mut data = JpegBuilder::new()
        .comment("complete")
        .segment(0xE1, &[0x55; 32])
        .build();
    data.truncate(data.len() - 20);

    let segments = JpegSegmentReader::read_segments_from(Cursor::new(data), None).unwrap();
    assert_eq!(segments.segment_count(JpegSegmentType::Com), 1);
    assert!(!segments.contains_segment(JpegSegmentType::App1));
}

#[test]
fn test_scan_errors() {
    let err = JpegSegmentReader::read_segments_from(Cursor::new([0x89, 0x50, 0x4E, 0x47]), None)
        .unwrap_err();
    assert_eq!(err, JpegError::InvalidMagic(0x8950));

    let short_length = [0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x01];
    let err = JpegSegmentReader::read_segments_from(Cursor::new(short_length), None).unwrap_err();
    assert_eq!(err, JpegError::NegativeSegmentLength);
}

// =============================================================================
// Metadata Extraction Tests
// =============================================================================

#[test]
fn test_frame_comment_and_exif() {
    let data = JpegBuilder::new()
        .exif(&camera_tiff(ByteOrder::LittleEndian))
        .comment("holiday")
        .frame(0xC0, 480, 640, &[1, 2, 3])
        .with_scan()
        .build();

    let metadata = read_metadata(Cursor::new(data)).unwrap();
    let kinds: Vec<_> = metadata.directories().iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            DirectoryKind::Jpeg,
            DirectoryKind::JpegComment,
            DirectoryKind::ExifIfd0,
            DirectoryKind::ExifSubIfd,
        ]
    );

    let jpeg = &metadata.directories()[0];
    assert_eq!(jpeg.get_int(TAG_IMAGE_HEIGHT), Some(480));
    assert_eq!(jpeg.get_int(TAG_IMAGE_WIDTH), Some(640));
    assert_eq!(jpeg.get_int(TAG_NUMBER_OF_COMPONENTS), Some(3));
    assert_eq!(jpeg.get_int(0xFFFD), Some(0));

    let comment = &metadata.directories()[1];
    assert_eq!(comment.get_string(TAG_COMMENT).as_deref(), Some("holiday"));

    let ifd0 = metadata.first_directory_of_kind(DirectoryKind::ExifIfd0).unwrap();
    assert_eq!(ifd0.get_string(0x010F).as_deref(), Some("Canon"));
    assert!(!metadata.has_errors());
}

#[test]
fn test_progressive_frame_compression_type() {
    let data = JpegBuilder::new().frame(0xC2, 10, 20, &[1]).build();
    let metadata = read_metadata_from_bytes(data, &ExtractOptions::default()).unwrap();
    let jpeg = metadata.first_directory_of_kind(DirectoryKind::Jpeg).unwrap();
    assert_eq!(jpeg.get_int(0xFFFD), Some(2));
}

#[test]
fn test_non_exif_app1_ignored() {
    let data = JpegBuilder::new()
        .segment(0xE1, b"http://ns.adobe.com/xap/1.0/\0<x:xmpmeta/>")
        .build();
    let metadata = read_metadata(Cursor::new(data)).unwrap();
    assert_eq!(metadata.directory_count(), 0);
}

#[test]
fn test_bad_exif_header_becomes_error_directory() {
    let data = JpegBuilder::new()
        .comment("still here")
        .exif(b"XX\x00\x2A\x00\x00\x00\x08")
        .build();

    let metadata = read_metadata(Cursor::new(data)).unwrap();
    assert!(metadata.contains_directory_of_kind(DirectoryKind::JpegComment));

    let error_dir = metadata.first_directory_of_kind(DirectoryKind::Error).unwrap();
    assert_eq!(error_dir.errors().len(), 1);
    assert!(error_dir.errors()[0].starts_with("Exception processing TIFF data"));
}

#[test]
fn test_multiple_exif_segments() {
    let data = JpegBuilder::new()
        .exif(&camera_tiff(ByteOrder::BigEndian))
        .exif(&camera_tiff(ByteOrder::LittleEndian))
        .build();

    let metadata = read_metadata(Cursor::new(data)).unwrap();
    assert_eq!(metadata.directories_of_kind(DirectoryKind::ExifIfd0).count(), 2);
}

#[test]
fn test_not_jpeg_or_tiff() {
    let err = read_metadata(Cursor::new(b"RIFF\0\0\0\0WEBP".to_vec())).unwrap_err();
    assert_eq!(err, MetadataError::UnknownFormat);
}
