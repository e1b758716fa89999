//! TIFF header and IFD walker.
//!
//! ```text
//! header:  "II"|"MM"  marker:u16  first_ifd:u32
//! IFD:     count:u16  entry[count]  next_ifd:u32
//! entry:   tag:u16  format:u16  components:u32  value_or_offset:u32
//! ```
//!
//! Offsets are relative to the header. Values of four bytes or fewer sit in
//! the entry itself.
//!
//! IFDs nest (sub-IFD pointers, MakerNotes) and chain (next-IFD links). The
//! walk keeps an explicit stack of [`IfdFrame`]s instead of recursing, so
//! hostile nesting cannot exhaust the call stack, while the handler still
//! sees the calls of a depth-first recursive walk in the same order. An IFD
//! offset is entered at most once per [`TiffReader::process_tiff`] call.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::{ReadError, TiffError};
use crate::io::{ByteOrder, RandomAccessReader};
use crate::model::Rational;

use super::{CustomTag, IfdEntry, TiffDataFormat, TiffHandler};

/// Default number of invalid format codes tolerated in one IFD.
pub const DEFAULT_MAX_FORMAT_ERRORS: usize = 5;

const BYTE_ORDER_MOTOROLA: u16 = 0x4D4D;
const BYTE_ORDER_INTEL: u16 = 0x4949;

/// Header (8 bytes) precedes the first IFD when its offset is unusable.
const DEFAULT_FIRST_IFD_OFFSET: u64 = 8;

const ENTRY_SIZE: u64 = 12;

/// Walks TIFF structures, reporting everything to a [`TiffHandler`].
#[derive(Debug, Clone)]
pub struct TiffReader {
    max_format_errors: usize,
}

impl Default for TiffReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a suspended IFD resumes once its child IFD completes.
#[derive(Debug)]
enum Phase {
    /// Decoding entries, starting with `next_entry`
    Entries,
    /// Asking the handler about each pointer of a possible sub-IFD tag
    SubIfds {
        entry: IfdEntry,
        next_pointer: u32,
        entered: bool,
    },
    /// The follower IFD has been walked; only closing remains
    Done,
}

/// One IFD being walked.
#[derive(Debug)]
struct IfdFrame {
    ifd_offset: u64,
    tiff_header_offset: u64,
    entry_count: u16,
    next_entry: u16,
    format_errors: usize,
    /// Byte order to restore on exit when this IFD flipped it
    restore_order: Option<ByteOrder>,
    phase: Phase,
}

enum Step {
    Continue,
    Descend { ifd_offset: u64, tiff_header_offset: u64 },
    Close,
}

impl TiffReader {
    pub fn new() -> Self {
        Self {
            max_format_errors: DEFAULT_MAX_FORMAT_ERRORS,
        }
    }

    /// Abandon an IFD once more than `max` entries had unknown format codes.
    pub fn with_max_format_errors(mut self, max: usize) -> Self {
        self.max_format_errors = max;
        self
    }

    #[inline]
    pub fn max_format_errors(&self) -> usize {
        self.max_format_errors
    }

    /// Decode the TIFF header at `tiff_header_offset` and walk every IFD
    /// reachable from it.
    ///
    /// The reader's byte order is set from the header.
    ///
    /// # Errors
    ///
    /// Only header problems are fatal: unknown byte-order bytes
    /// ([`TiffError::InvalidByteOrder`]), a marker the handler rejects, or a
    /// header that cannot be read. Problems inside IFDs are reported through
    /// [`TiffHandler::error`] and the offending IFD or entry is skipped.
    pub fn process_tiff(
        &self,
        reader: &mut dyn RandomAccessReader,
        handler: &mut dyn TiffHandler,
        tiff_header_offset: u64,
    ) -> Result<(), TiffError> {
        let order = reader.get_u16(tiff_header_offset)?;
        match order {
            BYTE_ORDER_MOTOROLA => reader.set_byte_order(ByteOrder::BigEndian),
            BYTE_ORDER_INTEL => reader.set_byte_order(ByteOrder::LittleEndian),
            other => return Err(TiffError::InvalidByteOrder(other)),
        }

        let marker = reader.get_u16(tiff_header_offset + 2)?;
        handler.set_tiff_marker(marker)?;

        let mut first_ifd = u64::from(reader.get_u32(tiff_header_offset + 4)?) + tiff_header_offset;
        if first_ifd >= reader.length()?.saturating_sub(1) {
            handler.warn("First IFD offset is beyond the end of the TIFF data segment -- trying default offset");
            first_ifd = tiff_header_offset + DEFAULT_FIRST_IFD_OFFSET;
        }

        self.process_ifd(reader, handler, first_ifd, tiff_header_offset);
        Ok(())
    }

    /// Walk the IFD at `ifd_offset` and everything reachable from it.
    ///
    /// Uses the reader's current byte order.
    pub fn process_ifd(
        &self,
        reader: &mut dyn RandomAccessReader,
        handler: &mut dyn TiffHandler,
        ifd_offset: u64,
        tiff_header_offset: u64,
    ) {
        let mut visited = HashSet::new();
        let mut stack: Vec<IfdFrame> = Vec::new();

        if let Some(frame) = open_frame(reader, handler, &mut visited, ifd_offset, tiff_header_offset) {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            match self.step(reader, handler, &visited, frame) {
                Step::Continue => {}
                Step::Descend {
                    ifd_offset,
                    tiff_header_offset,
                } => {
                    if let Some(child) =
                        open_frame(reader, handler, &mut visited, ifd_offset, tiff_header_offset)
                    {
                        stack.push(child);
                    }
                }
                Step::Close => {
                    if let Some(frame) = stack.pop() {
                        close_frame(reader, handler, frame);
                    }
                }
            }
        }
    }

    fn step(
        &self,
        reader: &mut dyn RandomAccessReader,
        handler: &mut dyn TiffHandler,
        visited: &HashSet<u64>,
        frame: &mut IfdFrame,
    ) -> Step {
        match frame.phase {
            Phase::Done => Step::Close,
            Phase::SubIfds {
                entry,
                ref mut next_pointer,
                ref mut entered,
            } => {
                while *next_pointer < entry.component_count {
                    let index = *next_pointer;
                    *next_pointer += 1;
                    if !handler.try_enter_sub_ifd(entry.tag_id) {
                        continue;
                    }
                    *entered = true;
                    match reader.get_u32(entry.value_offset + 4 * u64::from(index)) {
                        Ok(pointer) => {
                            return Step::Descend {
                                ifd_offset: frame.tiff_header_offset + u64::from(pointer),
                                tiff_header_offset: frame.tiff_header_offset,
                            };
                        }
                        Err(e) => {
                            handler.error(&e.to_string());
                            handler.ending_ifd();
                        }
                    }
                }
                let entered = *entered;
                frame.phase = Phase::Entries;
                if entered {
                    Step::Continue
                } else {
                    process_value(reader, handler, &entry)
                }
            }
            Phase::Entries if frame.next_entry < frame.entry_count => {
                let index = frame.next_entry;
                frame.next_entry += 1;
                match self.read_entry(reader, handler, frame, index) {
                    Ok(step) => step,
                    Err(e) => {
                        handler.error(&e.to_string());
                        Step::Continue
                    }
                }
            }
            Phase::Entries => {
                frame.phase = Phase::Done;
                match next_ifd_offset(reader, frame, visited) {
                    Ok(Some(next)) if handler.has_follower_ifd() => Step::Descend {
                        ifd_offset: next,
                        tiff_header_offset: frame.tiff_header_offset,
                    },
                    Ok(_) => Step::Close,
                    Err(e) => {
                        handler.error(&e.to_string());
                        Step::Close
                    }
                }
            }
        }
    }

    /// Decode entry `index` of the frame's IFD.
    fn read_entry(
        &self,
        reader: &mut dyn RandomAccessReader,
        handler: &mut dyn TiffHandler,
        frame: &mut IfdFrame,
        index: u16,
    ) -> Result<Step, ReadError> {
        let entry_offset = frame.ifd_offset + 2 + ENTRY_SIZE * u64::from(index);
        let tag_id = reader.get_u16(entry_offset)?;
        let format_code = reader.get_u16(entry_offset + 2)?;
        let component_count = reader.get_u32(entry_offset + 4)?;

        let byte_count = match TiffDataFormat::from_code(format_code) {
            Some(format) => u64::from(component_count) * format.component_size(),
            None => match handler.try_custom_process_format(tag_id, format_code, component_count) {
                Some(byte_count) => byte_count,
                None => {
                    frame.format_errors += 1;
                    handler.error(&format!(
                        "Invalid TIFF tag format code {format_code} for tag 0x{tag_id:04X}"
                    ));
                    if frame.format_errors > self.max_format_errors {
                        handler.error("Stopping processing as too many errors seen in TIFF IFD");
                        debug!(ifd_offset = frame.ifd_offset, "abandoned IFD after repeated format errors");
                        return Ok(Step::Close);
                    }
                    return Ok(Step::Continue);
                }
            },
        };

        let length = reader.length()?;
        let value_offset = if byte_count > 4 {
            let pointer = frame.tiff_header_offset + u64::from(reader.get_u32(entry_offset + 8)?);
            if pointer.checked_add(byte_count).map_or(true, |end| end > length) {
                handler.error("Illegal TIFF tag pointer offset");
                return Ok(Step::Continue);
            }
            pointer
        } else {
            entry_offset + 8
        };

        if value_offset > length {
            handler.error("Illegal TIFF tag pointer offset");
            return Ok(Step::Continue);
        }
        if value_offset + byte_count > length {
            handler.error(&format!(
                "Illegal number of bytes for TIFF tag data: {byte_count}"
            ));
            return Ok(Step::Continue);
        }

        let entry = IfdEntry {
            tag_id,
            format_code,
            component_count,
            value_offset,
            byte_count,
            tiff_header_offset: frame.tiff_header_offset,
        };
        trace!(
            tag = format_args!("0x{tag_id:04X}"),
            format = format_code,
            count = component_count,
            "IFD entry"
        );

        if component_count > 0 && byte_count == 4 * u64::from(component_count) {
            frame.phase = Phase::SubIfds {
                entry,
                next_pointer: 0,
                entered: false,
            };
            return Ok(Step::Continue);
        }

        Ok(process_value(reader, handler, &entry))
    }
}

/// Validate and enter the IFD at `ifd_offset`.
///
/// A rejected IFD still gets its [`TiffHandler::ending_ifd`] call.
fn open_frame(
    reader: &mut dyn RandomAccessReader,
    handler: &mut dyn TiffHandler,
    visited: &mut HashSet<u64>,
    ifd_offset: u64,
    tiff_header_offset: u64,
) -> Option<IfdFrame> {
    if !visited.insert(ifd_offset) {
        debug!(ifd_offset, "IFD already visited, skipping");
        handler.ending_ifd();
        return None;
    }

    let mut frame = IfdFrame {
        ifd_offset,
        tiff_header_offset,
        entry_count: 0,
        next_entry: 0,
        format_errors: 0,
        restore_order: None,
        phase: Phase::Entries,
    };

    match check_ifd(reader, handler, &mut frame) {
        Ok(true) => Some(frame),
        Ok(false) => {
            close_frame(reader, handler, frame);
            None
        }
        Err(e) => {
            handler.error(&e.to_string());
            close_frame(reader, handler, frame);
            None
        }
    }
}

/// Read the entry count, applying the byte-order heuristic, and check that
/// the whole IFD lies within the data.
fn check_ifd(
    reader: &mut dyn RandomAccessReader,
    handler: &mut dyn TiffHandler,
    frame: &mut IfdFrame,
) -> Result<bool, ReadError> {
    let length = reader.length()?;
    if frame.ifd_offset >= length {
        handler.error("Ignored IFD marked to start outside data segment");
        return Ok(false);
    }

    let mut count = reader.get_u16(frame.ifd_offset)?;

    // No real IFD has more than 255 entries; a count like 0x0300 means
    // this IFD was written in the other byte order
    if count > 0xFF && count & 0xFF == 0 {
        let order = reader.byte_order();
        frame.restore_order = Some(order);
        reader.set_byte_order(order.flipped());
        count >>= 8;
        debug!(ifd_offset = frame.ifd_offset, entries = count, "flipped byte order for IFD");
    }

    let ifd_len = 2 + ENTRY_SIZE * u64::from(count) + 4;
    if frame.ifd_offset + ifd_len > length {
        handler.error("Illegally sized IFD");
        return Ok(false);
    }

    frame.entry_count = count;
    Ok(true)
}

fn close_frame(reader: &mut dyn RandomAccessReader, handler: &mut dyn TiffHandler, frame: IfdFrame) {
    handler.ending_ifd();
    if let Some(order) = frame.restore_order {
        reader.set_byte_order(order);
    }
}

/// Absolute offset of the next chained IFD, if it should be considered.
fn next_ifd_offset(
    reader: &mut dyn RandomAccessReader,
    frame: &IfdFrame,
    visited: &HashSet<u64>,
) -> Result<Option<u64>, ReadError> {
    let link = frame.ifd_offset + 2 + ENTRY_SIZE * u64::from(frame.entry_count);
    let next = reader.get_u32(link)?;
    if next == 0 {
        return Ok(None);
    }

    let next = u64::from(next) + frame.tiff_header_offset;
    if next >= reader.length()? {
        debug!(next, "next IFD offset out of bounds");
        return Ok(None);
    }
    if next < frame.ifd_offset {
        debug!(next, current = frame.ifd_offset, "next IFD offset points backwards");
        return Ok(None);
    }
    if visited.contains(&next) {
        debug!(next, "IFD chain loops back on itself");
        return Ok(None);
    }
    Ok(Some(next))
}

/// Offer an entry to the handler, then decode it normally if declined.
fn process_value(
    reader: &mut dyn RandomAccessReader,
    handler: &mut dyn TiffHandler,
    entry: &IfdEntry,
) -> Step {
    match handler.custom_process_tag(reader, entry) {
        Ok(CustomTag::Consumed) => Step::Continue,
        Ok(CustomTag::WalkIfd {
            ifd_offset,
            tiff_header_offset,
        }) => Step::Descend {
            ifd_offset,
            tiff_header_offset,
        },
        Ok(CustomTag::Declined) => {
            if let Err(e) = process_tag(reader, handler, entry) {
                handler.error(&e.to_string());
            }
            Step::Continue
        }
        Err(e) => {
            handler.error(&e.to_string());
            Step::Continue
        }
    }
}

/// Decode an entry's values by format code and pass them to the typed setters.
pub fn process_tag(
    reader: &mut dyn RandomAccessReader,
    handler: &mut dyn TiffHandler,
    entry: &IfdEntry,
) -> Result<(), ReadError> {
    let tag = entry.tag_id;
    let offset = entry.value_offset;
    let count = entry.component_count;

    let Some(format) = TiffDataFormat::from_code(entry.format_code) else {
        handler.error(&format!(
            "Invalid TIFF tag format code {} for tag 0x{:04X}",
            entry.format_code, tag
        ));
        return Ok(());
    };

    match format {
        TiffDataFormat::Undefined => {
            let bytes = reader.get_bytes(offset, count as usize)?;
            handler.set_byte_array(tag, bytes);
        }
        TiffDataFormat::String => {
            let value = reader.get_null_terminated_string_value(offset, count as usize, None)?;
            handler.set_string(tag, value);
        }
        TiffDataFormat::Rational64s => {
            let values = read_array(count, 8, offset, |at| {
                Ok(Rational::new(
                    i64::from(reader.get_i32(at)?),
                    i64::from(reader.get_i32(at + 4)?),
                ))
            })?;
            match Components::from(values) {
                Components::One(v) => handler.set_rational(tag, v),
                Components::Many(v) => handler.set_rational_array(tag, v),
            }
        }
        TiffDataFormat::Rational64u => {
            let values = read_array(count, 8, offset, |at| {
                Ok(Rational::new(
                    i64::from(reader.get_u32(at)?),
                    i64::from(reader.get_u32(at + 4)?),
                ))
            })?;
            match Components::from(values) {
                Components::One(v) => handler.set_rational(tag, v),
                Components::Many(v) => handler.set_rational_array(tag, v),
            }
        }
        TiffDataFormat::Float32 => {
            match Components::from(read_array(count, 4, offset, |at| reader.get_f32(at))?) {
                Components::One(v) => handler.set_float(tag, v),
                Components::Many(v) => handler.set_float_array(tag, v),
            }
        }
        TiffDataFormat::Float64 => {
            match Components::from(read_array(count, 8, offset, |at| reader.get_f64(at))?) {
                Components::One(v) => handler.set_double(tag, v),
                Components::Many(v) => handler.set_double_array(tag, v),
            }
        }
        TiffDataFormat::Int8s => {
            match Components::from(read_array(count, 1, offset, |at| reader.get_i8(at))?) {
                Components::One(v) => handler.set_int8s(tag, v),
                Components::Many(v) => handler.set_int8s_array(tag, v),
            }
        }
        TiffDataFormat::Int8u => {
            match Components::from(read_array(count, 1, offset, |at| reader.get_u8(at))?) {
                Components::One(v) => handler.set_int8u(tag, v),
                Components::Many(v) => handler.set_int8u_array(tag, v),
            }
        }
        TiffDataFormat::Int16s => {
            match Components::from(read_array(count, 2, offset, |at| reader.get_i16(at))?) {
                Components::One(v) => handler.set_int16s(tag, v),
                Components::Many(v) => handler.set_int16s_array(tag, v),
            }
        }
        TiffDataFormat::Int16u => {
            match Components::from(read_array(count, 2, offset, |at| reader.get_u16(at))?) {
                Components::One(v) => handler.set_int16u(tag, v),
                Components::Many(v) => handler.set_int16u_array(tag, v),
            }
        }
        TiffDataFormat::Int32s => {
            match Components::from(read_array(count, 4, offset, |at| reader.get_i32(at))?) {
                Components::One(v) => handler.set_int32s(tag, v),
                Components::Many(v) => handler.set_int32s_array(tag, v),
            }
        }
        TiffDataFormat::Int32u => {
            match Components::from(read_array(count, 4, offset, |at| reader.get_u32(at))?) {
                Components::One(v) => handler.set_int32u(tag, v),
                Components::Many(v) => handler.set_int32u_array(tag, v),
            }
        }
    }
    Ok(())
}

fn read_array<T>(
    count: u32,
    size: u64,
    offset: u64,
    mut read: impl FnMut(u64) -> Result<T, ReadError>,
) -> Result<Vec<T>, ReadError> {
    (0..u64::from(count)).map(|i| read(offset + i * size)).collect()
}

/// A component count of one selects the scalar setter; any other count
/// (zero included) the array setter.
enum Components<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> From<Vec<T>> for Components<T> {
    fn from(mut values: Vec<T>) -> Self {
        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return Components::One(value);
            }
        }
        Components::Many(values)
    }
}

// =============================================================================
// Tests
// =============================================================================
