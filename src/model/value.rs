//! Tag values as stored in a [`Directory`](super::Directory).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use super::{Rational, StringValue};

/// A decoded value with no fixed representation.
///
/// Used for structured payloads such as JPEG component descriptors. Retrieve
/// the concrete type with [`Directory::get_object`](super::Directory::get_object).
pub trait ObjectValue: Any + Send + Sync + fmt::Debug + fmt::Display {
    fn as_any(&self) -> &dyn Any;
}

/// Every shape a tag value can take.
#[derive(Debug, Clone)]
pub enum TagValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Text(String),
    Str(StringValue),
    Rational(Rational),
    Date(NaiveDateTime),
    ByteArray(Vec<u8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    RationalArray(Vec<Rational>),
    TextArray(Vec<String>),
    StrArray(Vec<StringValue>),
    Object(Arc<dyn ObjectValue>),
}

impl TagValue {
    /// Short name of the stored shape, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            TagValue::Int(_) => "int",
            TagValue::Long(_) => "long",
            TagValue::Float(_) => "float",
            TagValue::Double(_) => "double",
            TagValue::Boolean(_) => "boolean",
            TagValue::Text(_) => "text",
            TagValue::Str(_) => "string",
            TagValue::Rational(_) => "rational",
            TagValue::Date(_) => "date",
            TagValue::ByteArray(_) => "byte array",
            TagValue::IntArray(_) => "int array",
            TagValue::LongArray(_) => "long array",
            TagValue::FloatArray(_) => "float array",
            TagValue::DoubleArray(_) => "double array",
            TagValue::RationalArray(_) => "rational array",
            TagValue::TextArray(_) => "text array",
            TagValue::StrArray(_) => "string array",
            TagValue::Object(_) => "object",
        }
    }

    /// Number of elements held; scalars count as one.
    pub fn len(&self) -> usize {
        match self {
            TagValue::ByteArray(v) => v.len(),
            TagValue::IntArray(v) => v.len(),
            TagValue::LongArray(v) => v.len(),
            TagValue::FloatArray(v) => v.len(),
            TagValue::DoubleArray(v) => v.len(),
            TagValue::RationalArray(v) => v.len(),
            TagValue::TextArray(v) => v.len(),
            TagValue::StrArray(v) => v.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            TagValue::ByteArray(_)
                | TagValue::IntArray(_)
                | TagValue::LongArray(_)
                | TagValue::FloatArray(_)
                | TagValue::DoubleArray(_)
                | TagValue::RationalArray(_)
                | TagValue::TextArray(_)
                | TagValue::StrArray(_)
        )
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for TagValue {
                fn from(value: $ty) -> Self {
                    TagValue::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Boolean,
    String => Text,
    StringValue => Str,
    Rational => Rational,
    NaiveDateTime => Date,
    Vec<u8> => ByteArray,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
    Vec<f32> => FloatArray,
    Vec<f64> => DoubleArray,
    Vec<Rational> => RationalArray,
    Vec<String> => TextArray,
    Vec<StringValue> => StrArray,
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Text(value.to_string())
    }
}
