//! Typed tag storage.
//!
//! A [`Directory`] maps tag ids to [`TagValue`]s, remembers the order in
//! which tags were first defined, and collects the non-fatal errors raised
//! while it was being populated.
//!
//! Getters never fail: they coerce whatever was stored into the requested
//! shape when a sensible conversion exists and return `None` otherwise. The
//! `require_*` variants turn that `None` into a [`TagError`] that says
//! whether the tag was absent or merely unconvertible.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::TagError;

use super::{DirectoryId, DirectoryKind, ObjectValue, Rational, StringValue, TagValue};

/// Layout used when rendering dates as text.
pub const DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Date-time layouts accepted when parsing text into a date.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y:%m:%d %H:%M:%S",
    "%Y:%m:%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_LAYOUTS: &[&str] = &["%Y:%m:%d", "%Y-%m-%d", "%Y.%m.%d"];

/// Arrays longer than this are summarised rather than listed in descriptions.
const MAX_LISTED_ELEMENTS: usize = 16;

// =============================================================================
// Directory
// =============================================================================

/// A group of tags decoded from one IFD or segment.
#[derive(Debug, Clone)]
pub struct Directory {
    kind: DirectoryKind,
    values: HashMap<u32, TagValue>,
    order: Vec<u32>,
    errors: Vec<String>,
    parent: Option<DirectoryId>,
}

impl Directory {
    pub fn new(kind: DirectoryKind) -> Self {
        Self {
            kind,
            values: HashMap::new(),
            order: Vec::new(),
            errors: Vec::new(),
            parent: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> DirectoryKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    pub fn parent(&self) -> Option<DirectoryId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<DirectoryId>) {
        self.parent = parent;
    }

    // -------------------------------------------------------------------------
    // Writing
    // -------------------------------------------------------------------------

    /// Store a value. A tag keeps its original position when rewritten.
    pub fn set_value(&mut self, tag: u32, value: impl Into<TagValue>) {
        let value = value.into();
        match self.values.insert(tag, value) {
            Some(previous) => debug!(
                directory = self.kind.name(),
                tag = format_args!("0x{tag:04X}"),
                replaced = previous.type_name(),
                "tag value overwritten"
            ),
            None => self.order.push(tag),
        }
    }

    pub fn set_int(&mut self, tag: u32, value: i32) {
        self.set_value(tag, value);
    }

    pub fn set_string_value(&mut self, tag: u32, value: StringValue) {
        self.set_value(tag, value);
    }

    pub fn set_rational(&mut self, tag: u32, value: Rational) {
        self.set_value(tag, value);
    }

    pub fn set_object(&mut self, tag: u32, value: impl ObjectValue) {
        self.set_value(tag, TagValue::Object(Arc::new(value)));
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    #[inline]
    pub fn contains_tag(&self, tag: u32) -> bool {
        self.values.contains_key(&tag)
    }

    #[inline]
    pub fn tag_count(&self) -> usize {
        self.order.len()
    }

    /// Tag ids in the order they were first set.
    #[inline]
    pub fn tag_types(&self) -> &[u32] {
        &self.order
    }

    /// Views of every defined tag, in definition order.
    pub fn tags(&self) -> Vec<Tag<'_>> {
        self.order
            .iter()
            .map(|&tag_type| Tag {
                tag_type,
                directory: self,
            })
            .collect()
    }

    #[inline]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// No tags and no errors.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty() && self.errors.is_empty()
    }

    /// Name from the kind's table, or `Unknown tag (0x....)`.
    pub fn tag_name(&self, tag: u32) -> String {
        self.kind
            .tag_name(tag)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unknown tag (0x{tag:04x})"))
    }

    pub fn has_tag_name(&self, tag: u32) -> bool {
        self.kind.tag_name(tag).is_some()
    }

    #[inline]
    pub fn get_value(&self, tag: u32) -> Option<&TagValue> {
        self.values.get(&tag)
    }

    /// Generic human-readable rendering of a tag's value.
    ///
    /// Long arrays are summarised as `[N values]`.
    pub fn description(&self, tag: u32) -> Option<String> {
        let value = self.values.get(&tag)?;
        if value.is_array() && value.len() > MAX_LISTED_ELEMENTS {
            let unit = match value {
                TagValue::ByteArray(_) => "bytes",
                _ => "values",
            };
            return Some(format!("[{} {}]", value.len(), unit));
        }
        self.get_string(tag)
    }

    // -------------------------------------------------------------------------
    // Numeric getters
    // -------------------------------------------------------------------------

    /// Integer view of a tag.
    ///
    /// Accepts numbers (floats and rationals truncate), booleans, the single
    /// element of a one-element array, and numeric text. Text that does not
    /// parse is read as a big-endian packed integer of its bytes.
    pub fn get_int(&self, tag: u32) -> Option<i32> {
        match self.values.get(&tag)? {
            TagValue::Int(v) => Some(*v),
            TagValue::Long(v) => Some(*v as i32),
            TagValue::Float(v) => Some(*v as i32),
            TagValue::Double(v) => Some(*v as i32),
            TagValue::Rational(r) => Some(r.to_i32()),
            TagValue::Boolean(b) => Some(i32::from(*b)),
            TagValue::Text(s) => Some(parse_int_or_pack(s.as_bytes())),
            TagValue::Str(s) => Some(parse_int_or_pack(s.bytes())),
            TagValue::IntArray(v) if v.len() == 1 => Some(v[0]),
            TagValue::LongArray(v) if v.len() == 1 => Some(v[0] as i32),
            TagValue::ByteArray(v) if v.len() == 1 => Some(i32::from(v[0])),
            TagValue::FloatArray(v) if v.len() == 1 => Some(v[0] as i32),
            TagValue::DoubleArray(v) if v.len() == 1 => Some(v[0] as i32),
            TagValue::RationalArray(v) if v.len() == 1 => Some(v[0].to_i32()),
            _ => None,
        }
    }

    pub fn get_long(&self, tag: u32) -> Option<i64> {
        match self.values.get(&tag)? {
            TagValue::Int(v) => Some(i64::from(*v)),
            TagValue::Long(v) => Some(*v),
            TagValue::Float(v) => Some(*v as i64),
            TagValue::Double(v) => Some(*v as i64),
            TagValue::Rational(r) => Some(r.to_i64()),
            TagValue::Boolean(b) => Some(i64::from(*b)),
            TagValue::Text(s) => s.trim().parse().ok(),
            TagValue::Str(s) => s.to_string().trim().parse().ok(),
            TagValue::IntArray(v) if v.len() == 1 => Some(i64::from(v[0])),
            TagValue::LongArray(v) if v.len() == 1 => Some(v[0]),
            TagValue::ByteArray(v) if v.len() == 1 => Some(i64::from(v[0])),
            TagValue::RationalArray(v) if v.len() == 1 => Some(v[0].to_i64()),
            _ => None,
        }
    }

    pub fn get_float(&self, tag: u32) -> Option<f32> {
        self.get_double(tag).map(|v| v as f32)
    }

    pub fn get_double(&self, tag: u32) -> Option<f64> {
        match self.values.get(&tag)? {
            TagValue::Int(v) => Some(f64::from(*v)),
            TagValue::Long(v) => Some(*v as f64),
            TagValue::Float(v) => Some(f64::from(*v)),
            TagValue::Double(v) => Some(*v),
            TagValue::Rational(r) => Some(r.to_f64()),
            TagValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            TagValue::Text(s) => s.trim().parse().ok(),
            TagValue::Str(s) => s.to_string().trim().parse().ok(),
            TagValue::IntArray(v) if v.len() == 1 => Some(f64::from(v[0])),
            TagValue::LongArray(v) if v.len() == 1 => Some(v[0] as f64),
            TagValue::FloatArray(v) if v.len() == 1 => Some(f64::from(v[0])),
            TagValue::DoubleArray(v) if v.len() == 1 => Some(v[0]),
            TagValue::RationalArray(v) if v.len() == 1 => Some(v[0].to_f64()),
            _ => None,
        }
    }

    pub fn get_boolean(&self, tag: u32) -> Option<bool> {
        match self.values.get(&tag)? {
            TagValue::Boolean(b) => Some(*b),
            TagValue::Text(s) => parse_bool(s),
            TagValue::Str(s) => parse_bool(&s.to_string()),
            TagValue::Int(v) => Some(*v != 0),
            TagValue::Long(v) => Some(*v != 0),
            TagValue::Float(v) => Some(*v != 0.0),
            TagValue::Double(v) => Some(*v != 0.0),
            TagValue::Rational(r) => Some(r.numerator() != 0),
            _ => None,
        }
    }

    pub fn get_rational(&self, tag: u32) -> Option<Rational> {
        match self.values.get(&tag)? {
            TagValue::Rational(r) => Some(*r),
            TagValue::Int(v) => Some(Rational::new(i64::from(*v), 1)),
            TagValue::Long(v) => Some(Rational::new(*v, 1)),
            TagValue::RationalArray(v) if v.len() == 1 => Some(v[0]),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Text getters
    // -------------------------------------------------------------------------

    /// Text rendering of any stored value. Arrays are space-separated.
    pub fn get_string(&self, tag: u32) -> Option<String> {
        let text = match self.values.get(&tag)? {
            TagValue::Int(v) => v.to_string(),
            TagValue::Long(v) => v.to_string(),
            TagValue::Float(v) => v.to_string(),
            TagValue::Double(v) => v.to_string(),
            TagValue::Boolean(v) => v.to_string(),
            TagValue::Text(s) => s.clone(),
            TagValue::Str(s) => s.to_string(),
            TagValue::Rational(r) => r.to_simple_string(true),
            TagValue::Date(d) => d.format(DATE_FORMAT).to_string(),
            TagValue::ByteArray(v) => join(v),
            TagValue::IntArray(v) => join(v),
            TagValue::LongArray(v) => join(v),
            TagValue::FloatArray(v) => join(v),
            TagValue::DoubleArray(v) => join(v),
            TagValue::RationalArray(v) => v
                .iter()
                .map(|r| r.to_simple_string(true))
                .collect::<Vec<_>>()
                .join(" "),
            TagValue::TextArray(v) => v.join(" "),
            TagValue::StrArray(v) => join(v),
            TagValue::Object(o) => o.to_string(),
        };
        Some(text)
    }

    pub fn get_string_value(&self, tag: u32) -> Option<StringValue> {
        match self.values.get(&tag)? {
            TagValue::Str(s) => Some(s.clone()),
            TagValue::Text(s) => Some(StringValue::from(s.as_str())),
            _ => None,
        }
    }

    pub fn get_string_array(&self, tag: u32) -> Option<Vec<String>> {
        match self.values.get(&tag)? {
            TagValue::TextArray(v) => Some(v.clone()),
            TagValue::StrArray(v) => Some(v.iter().map(ToString::to_string).collect()),
            TagValue::Text(s) => Some(vec![s.clone()]),
            TagValue::Str(s) => Some(vec![s.to_string()]),
            TagValue::IntArray(v) => Some(v.iter().map(ToString::to_string).collect()),
            TagValue::LongArray(v) => Some(v.iter().map(ToString::to_string).collect()),
            TagValue::ByteArray(v) => Some(v.iter().map(ToString::to_string).collect()),
            TagValue::RationalArray(v) => {
                Some(v.iter().map(|r| r.to_simple_string(false)).collect())
            }
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Array getters
    // -------------------------------------------------------------------------

    pub fn get_int_array(&self, tag: u32) -> Option<Vec<i32>> {
        match self.values.get(&tag)? {
            TagValue::IntArray(v) => Some(v.clone()),
            TagValue::LongArray(v) => Some(v.iter().map(|&x| x as i32).collect()),
            TagValue::ByteArray(v) => Some(v.iter().map(|&x| i32::from(x)).collect()),
            TagValue::RationalArray(v) => Some(v.iter().map(Rational::to_i32).collect()),
            TagValue::Text(s) => Some(s.chars().map(|c| c as i32).collect()),
            TagValue::Str(s) => Some(s.bytes().iter().map(|&b| i32::from(b)).collect()),
            TagValue::Int(v) => Some(vec![*v]),
            TagValue::Long(v) => Some(vec![*v as i32]),
            _ => None,
        }
    }

    pub fn get_long_array(&self, tag: u32) -> Option<Vec<i64>> {
        match self.values.get(&tag)? {
            TagValue::LongArray(v) => Some(v.clone()),
            TagValue::IntArray(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            TagValue::ByteArray(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            TagValue::RationalArray(v) => Some(v.iter().map(Rational::to_i64).collect()),
            TagValue::Int(v) => Some(vec![i64::from(*v)]),
            TagValue::Long(v) => Some(vec![*v]),
            _ => None,
        }
    }

    pub fn get_byte_array(&self, tag: u32) -> Option<Vec<u8>> {
        match self.values.get(&tag)? {
            TagValue::ByteArray(v) => Some(v.clone()),
            TagValue::IntArray(v) => Some(v.iter().map(|&x| x as u8).collect()),
            TagValue::LongArray(v) => Some(v.iter().map(|&x| x as u8).collect()),
            TagValue::RationalArray(v) => Some(v.iter().map(Rational::to_u8).collect()),
            TagValue::Text(s) => Some(s.as_bytes().to_vec()),
            TagValue::Str(s) => Some(s.bytes().to_vec()),
            TagValue::Int(v) => Some(vec![*v as u8]),
            _ => None,
        }
    }

    pub fn get_float_array(&self, tag: u32) -> Option<Vec<f32>> {
        match self.values.get(&tag)? {
            TagValue::FloatArray(v) => Some(v.clone()),
            other => self
                .double_array_of(other)
                .map(|v| v.into_iter().map(|x| x as f32).collect()),
        }
    }

    pub fn get_double_array(&self, tag: u32) -> Option<Vec<f64>> {
        let value = self.values.get(&tag)?;
        self.double_array_of(value)
    }

    fn double_array_of(&self, value: &TagValue) -> Option<Vec<f64>> {
        match value {
            TagValue::DoubleArray(v) => Some(v.clone()),
            TagValue::FloatArray(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            TagValue::IntArray(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            TagValue::LongArray(v) => Some(v.iter().map(|&x| x as f64).collect()),
            TagValue::RationalArray(v) => Some(v.iter().map(Rational::to_f64).collect()),
            TagValue::Float(v) => Some(vec![f64::from(*v)]),
            TagValue::Double(v) => Some(vec![*v]),
            _ => None,
        }
    }

    pub fn get_rational_array(&self, tag: u32) -> Option<Vec<Rational>> {
        match self.values.get(&tag)? {
            TagValue::RationalArray(v) => Some(v.clone()),
            TagValue::Rational(r) => Some(vec![*r]),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Dates and objects
    // -------------------------------------------------------------------------

    /// Date view of a tag: native dates, or text in one of the usual
    /// Exif/ISO layouts (`2024:01:31 12:00:00`, `2024-01-31T12:00`, `2024`, ...).
    pub fn get_date(&self, tag: u32) -> Option<NaiveDateTime> {
        match self.values.get(&tag)? {
            TagValue::Date(d) => Some(*d),
            TagValue::Text(s) => parse_date(s),
            TagValue::Str(s) => parse_date(&s.to_string()),
            _ => None,
        }
    }

    /// Borrow a stored object as its concrete type.
    pub fn get_object<T: ObjectValue>(&self, tag: u32) -> Option<&T> {
        match self.values.get(&tag)? {
            TagValue::Object(o) => o.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Required getters
    // -------------------------------------------------------------------------

    pub fn require_int(&self, tag: u32) -> Result<i32, TagError> {
        self.require(tag, Self::get_int)
    }

    pub fn require_long(&self, tag: u32) -> Result<i64, TagError> {
        self.require(tag, Self::get_long)
    }

    pub fn require_float(&self, tag: u32) -> Result<f32, TagError> {
        self.require(tag, Self::get_float)
    }

    pub fn require_double(&self, tag: u32) -> Result<f64, TagError> {
        self.require(tag, Self::get_double)
    }

    pub fn require_boolean(&self, tag: u32) -> Result<bool, TagError> {
        self.require(tag, Self::get_boolean)
    }

    fn require<T>(&self, tag: u32, get: fn(&Self, u32) -> Option<T>) -> Result<T, TagError> {
        let value = self.values.get(&tag).ok_or_else(|| TagError::Missing {
            tag: self.tag_name(tag),
            directory: self.name(),
        })?;
        get(self, tag).ok_or_else(|| TagError::Unconvertible {
            tag: self.tag_name(tag),
            directory: self.name(),
            value_type: value.type_name(),
        })
    }
}

fn join<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_int_or_pack(bytes: &[u8]) -> i32 {
    if let Some(v) = std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.trim().parse::<i32>().ok())
    {
        return v;
    }
    bytes
        .iter()
        .fold(0i32, |acc, &b| acc.wrapping_shl(8).wrapping_add(i32::from(b)))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    // Sub-second fractions are accepted and dropped
    let text = match text.rsplit_once('.') {
        Some((head, frac)) if head.len() >= 16 && frac.chars().all(|c| c.is_ascii_digit()) => {
            head
        }
        _ => text,
    };

    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(text, layout).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| parse_partial_date(text))
}

/// `YYYY-MM` and `YYYY` forms, which chrono cannot parse without a day.
fn parse_partial_date(text: &str) -> Option<NaiveDateTime> {
    let mut parts = text.splitn(2, ['-', ':']);
    let year = parts.next()?;
    if year.len() != 4 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

// =============================================================================
// Tag
// =============================================================================

/// Borrowed view of one tag in a directory.
#[derive(Debug, Clone, Copy)]
pub struct Tag<'a> {
    tag_type: u32,
    directory: &'a Directory,
}

impl<'a> Tag<'a> {
    #[inline]
    pub fn tag_type(&self) -> u32 {
        self.tag_type
    }

    /// Tag id as `0x` followed by four hex digits.
    pub fn tag_type_hex(&self) -> String {
        format!("0x{:04x}", self.tag_type)
    }

    pub fn tag_name(&self) -> String {
        self.directory.tag_name(self.tag_type)
    }

    pub fn has_tag_name(&self) -> bool {
        self.directory.has_tag_name(self.tag_type)
    }

    pub fn directory_name(&self) -> &'static str {
        self.directory.name()
    }

    pub fn description(&self) -> Option<String> {
        self.directory.description(self.tag_type)
    }

    pub fn value(&self) -> Option<&'a TagValue> {
        self.directory.get_value(self.tag_type)
    }
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = self
            .description()
            .unwrap_or_else(|| format!("[{} tag]", self.directory_name()));
        write!(
            f,
            "[{}] {} - {}",
            self.directory_name(),
            self.tag_name(),
            description
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
