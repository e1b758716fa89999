//! Decoded metadata: directories of typed tag values.
//!
//! - [`Metadata`] - every [`Directory`] found in a file, in discovery order
//! - [`Directory`] - tag id to [`TagValue`] map plus errors and an optional parent
//! - [`DirectoryKind`] - display name and tag-name table of a directory
//! - [`Rational`], [`StringValue`] - value types that need more than a primitive

mod directory;
mod kind;
mod metadata;
mod rational;
mod string_value;
mod value;

pub use directory::{Directory, Tag, DATE_FORMAT};
pub use kind::DirectoryKind;
pub use metadata::{DirectoryId, Metadata};
pub use rational::Rational;
pub use string_value::{Charset, StringValue};
pub use value::{ObjectValue, TagValue};
