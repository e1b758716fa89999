//! Printable views of extracted metadata and JPEG segment layouts.
//!
//! The report types are plain serde structs so the CLI can emit either JSON
//! or a line-oriented text listing from the same data.

use std::fmt::Write as _;

use serde::Serialize;

use crate::format::jpeg::{JpegSegmentData, JpegSegmentType};
use crate::model::{Directory, Metadata};

// =============================================================================
// Metadata Report
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataReport {
    pub directories: Vec<DirectoryReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryReport {
    /// Position of the directory in extraction order
    pub index: usize,

    /// Display name, e.g. "Exif SubIFD"
    pub name: String,

    /// Index of the parent directory, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,

    pub tags: Vec<TagReport>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagReport {
    /// Tag identifier as hex, e.g. "0x010f"
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MetadataReport {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let directories = metadata
            .iter()
            .map(|(id, directory)| DirectoryReport::from_directory(id.index(), directory))
            .collect();
        Self { directories }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// One `[directory] name - description` line per tag, errors indented below.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for directory in &self.directories {
            for tag in &directory.tags {
                let _ = writeln!(
                    out,
                    "[{}] {} - {}",
                    directory.name,
                    tag.name,
                    tag.description.as_deref().unwrap_or("")
                );
            }
            for error in &directory.errors {
                let _ = writeln!(out, "[{}] ERROR: {}", directory.name, error);
            }
        }
        out
    }
}

impl DirectoryReport {
    fn from_directory(index: usize, directory: &Directory) -> Self {
        let tags = directory
            .tags()
            .iter()
            .map(|tag| TagReport {
                id: tag.tag_type_hex(),
                name: tag.tag_name(),
                description: tag.description(),
            })
            .collect();

        Self {
            index,
            name: directory.name().to_string(),
            parent: directory.parent().map(|p| p.index()),
            tags,
            errors: directory.errors().to_vec(),
        }
    }
}

// =============================================================================
// Segment Report
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentReport {
    /// Marker byte as hex, e.g. "0xE1"
    pub marker: String,

    /// Segment type name, when the marker is a known type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Payload sizes in file order
    pub sizes: Vec<usize>,
}

impl SegmentReport {
    pub fn from_segments(segments: &JpegSegmentData) -> Vec<Self> {
        segments
            .markers()
            .map(|marker| Self {
                marker: format!("0x{marker:02X}"),
                kind: JpegSegmentType::from_u8(marker).map(|kind| format!("{kind:?}").to_uppercase()),
                sizes: segments
                    .segments_for_marker(marker)
                    .iter()
                    .map(|payload| payload.len())
                    .collect(),
            })
            .collect()
    }

    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    pub fn to_text(reports: &[Self]) -> String {
        let mut out = String::new();
        for report in reports {
            let sizes: Vec<String> = report.sizes.iter().map(|s| s.to_string()).collect();
            let _ = writeln!(
                out,
                "{} {:<5} x{} [{}]",
                report.marker,
                report.kind.as_deref().unwrap_or("?"),
                report.count(),
                sizes.join(", ")
            );
        }
        out
    }
}

// =============================================================================
// Tests
// =============================================================================
