//! Protobuf wire-format primitives for the protodyn codec.
//!
//! This crate provides [`WireWriter`] and [`WireReader`] for byte-level
//! encoding and decoding of the standard protocol-buffers wire format:
//! varints, zigzag integers, fixed-width integers, length-delimited payloads,
//! and field tags.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about schemas,
//!   messages, or fields; it only moves bytes.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use wire::{WireKind, WireReader, WireWriter};
//!
//! let mut writer = WireWriter::new();
//! writer.put_tag(1, WireKind::Varint);
//! writer.put_varint(150);
//! let bytes = writer.finish();
//!
//! let mut reader = WireReader::new(&bytes);
//! assert_eq!(reader.read_tag().unwrap(), (1, WireKind::Varint));
//! assert_eq!(reader.read_varint().unwrap(), 150);
//! assert!(reader.is_empty());
//! ```

mod error;
mod kind;
mod reader;
mod writer;

pub use error::{WireError, WireResult};
pub use kind::{unzigzag32, unzigzag64, zigzag32, zigzag64, WireKind, MAX_VARINT_BYTES};
pub use reader::WireReader;
pub use writer::WireWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let writer = WireWriter::new();
        let bytes = writer.finish();
        assert!(bytes.is_empty());

        let reader = WireReader::new(&bytes);
        assert!(reader.is_empty());
    }

    #[test]
    fn tag_and_value_roundtrip() {
        let mut writer = WireWriter::new();
        writer.put_tag(1, WireKind::Varint);
        writer.put_varint(1);
        writer.put_tag(2, WireKind::Bytes);
        writer.put_length_delimited(b"xiaoqiang");
        let bytes = writer.finish();

        let mut reader = WireReader::new(&bytes);
        assert_eq!(reader.read_tag().unwrap(), (1, WireKind::Varint));
        assert_eq!(reader.read_varint().unwrap(), 1);
        assert_eq!(reader.read_tag().unwrap(), (2, WireKind::Bytes));
        assert_eq!(reader.read_length_delimited().unwrap(), b"xiaoqiang");
        assert!(reader.is_empty());
    }

    #[test]
    fn doctest_example() {
        let mut writer = WireWriter::new();
        writer.put_tag(1, WireKind::Varint);
        writer.put_varint(150);
        let bytes = writer.finish();

        let mut reader = WireReader::new(&bytes);
        assert_eq!(reader.read_tag().unwrap(), (1, WireKind::Varint));
        assert_eq!(reader.read_varint().unwrap(), 150);
        assert!(reader.is_empty());
    }
}
