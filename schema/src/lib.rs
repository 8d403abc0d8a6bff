//! Schema descriptor model and field compiler for the protodyn codec.
//!
//! This crate defines the structural representation of a parsed schema
//! (messages, fields, enums, services) and the one-time compilation step that
//! turns it into ready-to-use marshal/unmarshal metadata:
//!
//! - Descriptor model as produced by an external `.proto` parser
//! - Two-pass compilation: namespace hoisting, then per-field resolution
//! - Precomputed tag codes, wire kinds, and tag-sorted field order
//! - Deterministic schema hashing
//!
//! # Design Principles
//!
//! - **Compile once, read forever** - A [`CompiledSchema`] is immutable and
//!   safe for unsynchronized concurrent reads.
//! - **No partial metadata** - [`compile`] consumes the raw [`Descriptor`];
//!   a schema that failed compilation can never be observed half-built.
//! - **Names, not links** - Fields reference other messages and enums by
//!   name through flat maps, so mutually recursive message types need no
//!   ownership cycles.

mod compile;
mod descriptor;
mod error;
mod hash;

pub use compile::{
    compile, CompiledField, CompiledMessage, CompiledSchema, ScalarKind, WELL_KNOWN_PREFIX,
};
pub use descriptor::{Descriptor, Enum, EnumValue, Field, Message, Method, Service, Type};
pub use error::{ParseError, SchemaError, SchemaResult};
pub use hash::schema_hash;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let descriptor = Descriptor::new("proto3")
            .message(Message::new("Empty"));
        let compiled = compile(descriptor).unwrap();
        let _ = schema_hash(&compiled);
        let _ = ScalarKind::Bool;
        let _ = WELL_KNOWN_PREFIX;
    }

    #[test]
    fn compile_then_lookup() {
        let descriptor = Descriptor::new("proto3").message(
            Message::new("Pet")
                .field(Field::new("name", 2, Type::named("string")))
                .field(Field::new("kind", 1, Type::named("int32"))),
        );
        let compiled = compile(descriptor).unwrap();
        let pet = compiled.message("Pet").unwrap();
        assert_eq!(pet.order, vec!["kind".to_string(), "name".to_string()]);
    }
}
