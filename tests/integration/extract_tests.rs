//! End-to-end extraction tests.
//!
//! Tests verify:
//! - Path, stream and in-memory entry points agree
//! - Format detection routes JPEG and TIFF input correctly
//! - Reports render the decoded metadata

use std::io::{Cursor, Write};

use exif_probe::report::{MetadataReport, SegmentReport};
use exif_probe::{
    detect_file_type, read_jpeg_metadata, read_metadata, read_metadata_from_bytes,
    read_metadata_from_path, ByteOrder, DirectoryKind, ExtractOptions, FileType, JpegSegmentReader,
    MetadataError, ReadError,
};

use super::test_utils::{camera_tiff, JpegBuilder};

fn camera_jpeg() -> Vec<u8> {
    JpegBuilder::new()
        .segment(0xE0, b"JFIF\0\x01\x02\0\0\x01\0\x01\0\0")
        .exif(&camera_tiff(ByteOrder::BigEndian))
        .frame(0xC0, 3000, 4000, &[1, 2, 3])
        .with_scan()
        .build()
}

fn write_temp(data: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

// =============================================================================
// Entry Point Tests
// =============================================================================

#[test]
fn test_read_jpeg_from_path() {
    let file = write_temp(&camera_jpeg());
    let metadata = read_metadata_from_path(file.path(), &ExtractOptions::default()).unwrap();

    assert_eq!(
        metadata
            .directories()
            .iter()
            .map(|d| d.kind())
            .collect::<Vec<_>>(),
        vec![DirectoryKind::Jpeg, DirectoryKind::ExifIfd0, DirectoryKind::ExifSubIfd]
    );

    let sub = metadata.first_directory_of_kind(DirectoryKind::ExifSubIfd).unwrap();
    let taken = sub.get_date(0x9003).unwrap();
    assert_eq!(taken.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-05-01 12:30:45");
}

#[test]
fn test_read_tiff_from_path() {
    let file = write_temp(&camera_tiff(ByteOrder::LittleEndian));
    let metadata = read_metadata_from_path(file.path(), &ExtractOptions::default()).unwrap();
    let ifd0 = metadata.first_directory_of_kind(DirectoryKind::ExifIfd0).unwrap();
    assert_eq!(ifd0.get_string(0x0110).as_deref(), Some("Canon EOS 5D"));
}

#[test]
fn test_entry_points_agree() {
    let data = camera_jpeg();
    let options = ExtractOptions::default();

    let from_stream = read_metadata(Cursor::new(data.clone())).unwrap();
    let from_bytes = read_metadata_from_bytes(data.clone(), &options).unwrap();
    let from_jpeg = read_jpeg_metadata(Cursor::new(data), &options).unwrap();

    let expected = MetadataReport::from_metadata(&from_stream);
    assert_eq!(MetadataReport::from_metadata(&from_bytes), expected);
    assert_eq!(MetadataReport::from_metadata(&from_jpeg), expected);
}

#[test]
fn test_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_metadata_from_path(dir.path().join("absent.jpg"), &ExtractOptions::default())
        .unwrap_err();
    assert!(matches!(err, MetadataError::Read(ReadError::Io(_))));
}

#[test]
fn test_short_input_is_unknown() {
    assert_eq!(
        read_metadata(Cursor::new(vec![0x49, 0x49])).unwrap_err(),
        MetadataError::UnknownFormat
    );
}

#[test]
fn test_detection() {
    assert_eq!(detect_file_type(&camera_jpeg()), Some(FileType::Jpeg));
    assert_eq!(
        detect_file_type(&camera_tiff(ByteOrder::BigEndian)),
        Some(FileType::Tiff)
    );
}

// =============================================================================
// Report Tests
// =============================================================================

#[test]
fn test_text_report() {
    let metadata = read_metadata(Cursor::new(camera_jpeg())).unwrap();
    let text = MetadataReport::from_metadata(&metadata).to_text();

    assert!(text.contains("[JPEG] Image Height - 3000"));
    assert!(text.contains("[Exif IFD0] Make - Canon"));
    assert!(text.contains("[Exif SubIFD] Exposure Time - 1/200"));
}

#[test]
fn test_json_report_links_parents() {
    let metadata = read_metadata(Cursor::new(camera_jpeg())).unwrap();
    let json = MetadataReport::from_metadata(&metadata).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let directories = value["directories"].as_array().unwrap();
    assert_eq!(directories.len(), 3);
    assert_eq!(directories[2]["name"], "Exif SubIFD");
    assert_eq!(directories[2]["parent"], 1);
}

#[test]
fn test_segment_report_from_file() {
    let file = write_temp(&camera_jpeg());
    let segments = JpegSegmentReader::read_segments_from_path(file.path(), None).unwrap();
    let reports = SegmentReport::from_segments(&segments);

    let markers: Vec<&str> = reports.iter().map(|r| r.marker.as_str()).collect();
    assert_eq!(markers, vec!["0xC0", "0xE0", "0xE1"]);
    assert!(reports.iter().all(|r| r.count() == 1));
}
