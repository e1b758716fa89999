//! Byte-order-aware readers.
//!
//! Two positioning models share the same primitive semantics:
//!
//! - [`SequentialReader`] - forward-only cursor, total length unknown
//!   ([`StreamReader`], [`SequentialByteArrayReader`])
//! - [`RandomAccessReader`] - indexed access, known length
//!   ([`ByteArrayReader`], [`RandomAccessStreamReader`])
//!
//! All readers default to big-endian (Motorola) order. Reading past the end
//! of the data yields [`ReadError::EndOfData`](crate::error::ReadError::EndOfData).

mod byte_array_reader;
mod byte_order;
mod random_access;
mod sequential;
mod sequential_bytes;
mod stream_random_reader;
mod stream_reader;

pub use byte_array_reader::ByteArrayReader;
pub use byte_order::ByteOrder;
pub use random_access::RandomAccessReader;
pub use sequential::SequentialReader;
pub use sequential_bytes::SequentialByteArrayReader;
pub use stream_random_reader::{RandomAccessStreamReader, DEFAULT_CHUNK_LEN};
pub use stream_reader::StreamReader;
