//! Dynamic record marshaling and unmarshaling for the protodyn codec.
//!
//! This is the main codec crate: it applies a compiled schema to untyped
//! records (name-to-value maps) and produces or consumes standard
//! protocol-buffers wire bytes, with no generated message structs anywhere.
//!
//! # Features
//!
//! - Marshal a [`Record`] to length-correct, tag-ordered wire bytes
//! - Unmarshal wire bytes back into a [`Record`]
//! - Loose value coercion (any numeric representation fits a numeric field)
//! - Packed encoding for repeated scalars, per-element for strings/bytes
//! - Recursive embedded messages
//! - Unknown-field tolerance on decode
//!
//! # Design Principles
//!
//! - **Deterministic** - Fields are walked in ascending tag order; the same
//!   record always produces the same bytes.
//! - **Atomic failures** - Marshal never leaves partial bytes in the output
//!   buffer; unmarshal never returns a partial record.
//! - **Implicit presence** - proto3 semantics: zero-valued singular scalars
//!   are never written, absent and zero are indistinguishable.

mod coerce;
mod decode;
mod encode;
mod error;
mod value;

pub use decode::decode_message;
pub use encode::encode_message;
pub use error::{CodecError, CodecResult, ValueReason};
pub use value::{Record, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{compile, Descriptor, Field, Message, Type};

    #[test]
    fn public_api_exports() {
        let _: CodecResult<()> = Ok(());
        let _ = Value::Int(1);
        let _: Record = Record::new();
    }

    #[test]
    fn marshal_unmarshal_smoke() {
        let descriptor = Descriptor::new("proto3").message(
            Message::new("Counter").field(Field::new("value", 1, Type::named("int64"))),
        );
        let schema = compile(descriptor).unwrap();

        let mut record = Record::new();
        record.insert("value".to_string(), Value::Int(7));

        let mut bytes = Vec::new();
        encode_message(&schema, "Counter", &record, &mut bytes).unwrap();
        let decoded = decode_message(&schema, "Counter", &bytes).unwrap();
        assert_eq!(decoded, record);
    }
}
