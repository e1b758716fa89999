use std::collections::BTreeMap;

use bytes::Bytes;

use super::JpegSegmentType;

/// Segment payloads collected from a JPEG stream, grouped by marker.
///
/// Payloads of the same type keep the order they appeared in. Keys are raw
/// marker bytes, so markers without a [`JpegSegmentType`] can be stored too.
#[derive(Debug, Clone, Default)]
pub struct JpegSegmentData {
    segments: BTreeMap<u8, Vec<Bytes>>,
}

impl JpegSegmentData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_segment(&mut self, marker: u8, payload: impl Into<Bytes>) {
        self.segments.entry(marker).or_default().push(payload.into());
    }

    /// Types with at least one stored payload, in marker order.
    pub fn segment_types(&self) -> Vec<JpegSegmentType> {
        self.segments
            .keys()
            .filter_map(|&m| JpegSegmentType::from_u8(m))
            .collect()
    }

    /// Raw marker bytes with at least one stored payload.
    pub fn markers(&self) -> impl Iterator<Item = u8> + '_ {
        self.segments.keys().copied()
    }

    /// The `occurrence`-th payload (zero-based) of the given type.
    pub fn segment(&self, kind: JpegSegmentType, occurrence: usize) -> Option<&Bytes> {
        self.segments_for_marker(kind.as_u8()).get(occurrence)
    }

    pub fn segments(&self, kind: JpegSegmentType) -> &[Bytes] {
        self.segments_for_marker(kind.as_u8())
    }

    pub fn segments_for_marker(&self, marker: u8) -> &[Bytes] {
        self.segments
            .get(&marker)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn segment_count(&self, kind: JpegSegmentType) -> usize {
        self.segments(kind).len()
    }

    pub fn contains_segment(&self, kind: JpegSegmentType) -> bool {
        self.segments.contains_key(&kind.as_u8())
    }

    /// Remove one payload; the type disappears once its last payload goes.
    pub fn remove_segment_occurrence(&mut self, kind: JpegSegmentType, occurrence: usize) -> Option<Bytes> {
        let marker = kind.as_u8();
        let list = self.segments.get_mut(&marker)?;
        if occurrence >= list.len() {
            return None;
        }
        let removed = list.remove(occurrence);
        if list.is_empty() {
            self.segments.remove(&marker);
        }
        Some(removed)
    }

    /// Remove every payload of the given type.
    pub fn remove_segment(&mut self, kind: JpegSegmentType) -> Vec<Bytes> {
        self.segments.remove(&kind.as_u8()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
