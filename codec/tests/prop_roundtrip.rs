//! Property tests: marshal/unmarshal round-trips over randomized records.

use codec::{decode_message, encode_message, Record, Value};
use proptest::prelude::*;
use schema::{compile, CompiledSchema, Descriptor, Field, Message, Type};

fn everything_schema() -> CompiledSchema {
    let descriptor = Descriptor::new("proto3").message(
        Message::new("Everything")
            .field(Field::new("flag", 1, Type::named("bool")))
            .field(Field::new("small", 2, Type::named("int32")))
            .field(Field::new("big", 3, Type::named("int64")))
            .field(Field::new("u_small", 4, Type::named("uint32")))
            .field(Field::new("u_big", 5, Type::named("uint64")))
            .field(Field::new("z_small", 6, Type::named("sint32")))
            .field(Field::new("z_big", 7, Type::named("sint64")))
            .field(Field::new("f_small", 8, Type::named("fixed32")))
            .field(Field::new("f_big", 9, Type::named("sfixed64")))
            .field(Field::new("ratio", 10, Type::named("float")))
            .field(Field::new("precise", 11, Type::named("double")))
            .field(Field::new("text", 12, Type::named("string")))
            .field(Field::new("blob", 13, Type::named("bytes")))
            .field(Field::new("ids", 14, Type::named("int64")).repeated())
            .field(Field::new("names", 15, Type::named("string")).repeated()),
    );
    compile(descriptor).unwrap()
}

/// True when a canonical value is the field's implicit zero, which marshal
/// omits and unmarshal therefore cannot restore.
fn is_implicit_zero(value: &Value) -> bool {
    match value {
        Value::Bool(v) => !v,
        Value::Int(v) => *v == 0,
        Value::UInt(v) => *v == 0,
        Value::Float(v) => v.to_bits() == 0,
        Value::Str(v) => v.is_empty(),
        Value::Bytes(v) => v.is_empty(),
        Value::List(v) => v.is_empty(),
        Value::Record(_) => false,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_record(
    flag: bool,
    small: i32,
    big: i64,
    u_small: u32,
    u_big: u64,
    z_small: i32,
    z_big: i64,
    f_small: u32,
    f_big: i64,
    ratio: f32,
    precise: f64,
    text: String,
    blob: Vec<u8>,
    ids: Vec<i64>,
    names: Vec<String>,
) -> Record {
    let mut record = Record::new();
    record.insert("flag".to_string(), Value::Bool(flag));
    record.insert("small".to_string(), Value::Int(i64::from(small)));
    record.insert("big".to_string(), Value::Int(big));
    record.insert("u_small".to_string(), Value::UInt(u64::from(u_small)));
    record.insert("u_big".to_string(), Value::UInt(u_big));
    record.insert("z_small".to_string(), Value::Int(i64::from(z_small)));
    record.insert("z_big".to_string(), Value::Int(z_big));
    record.insert("f_small".to_string(), Value::UInt(u64::from(f_small)));
    record.insert("f_big".to_string(), Value::Int(f_big));
    record.insert("ratio".to_string(), Value::Float(f64::from(ratio)));
    record.insert("precise".to_string(), Value::Float(precise));
    record.insert("text".to_string(), Value::Str(text));
    record.insert("blob".to_string(), Value::Bytes(blob));
    record.insert(
        "ids".to_string(),
        Value::List(ids.into_iter().map(Value::Int).collect()),
    );
    record.insert(
        "names".to_string(),
        Value::List(names.into_iter().map(Value::Str).collect()),
    );
    record
}

proptest! {
    #[test]
    #[allow(clippy::too_many_arguments)]
    fn canonical_records_roundtrip(
        flag in any::<bool>(),
        small in any::<i32>(),
        big in any::<i64>(),
        u_small in any::<u32>(),
        u_big in any::<u64>(),
        z_small in any::<i32>(),
        z_big in any::<i64>(),
        f_small in any::<u32>(),
        f_big in any::<i64>(),
        ratio in -1.0e30f32..1.0e30f32,
        precise in -1.0e300f64..1.0e300f64,
        text in "[\\x20-\\x7E]{0,24}",
        blob in proptest::collection::vec(any::<u8>(), 0..32),
        ids in proptest::collection::vec(any::<i64>(), 0..8),
        names in proptest::collection::vec("[a-z]{0,6}", 0..4),
    ) {
        let schema = everything_schema();
        let record = build_record(
            flag, small, big, u_small, u_big, z_small, z_big, f_small, f_big,
            ratio, precise, text, blob, ids, names,
        );

        let mut bytes = Vec::new();
        encode_message(&schema, "Everything", &record, &mut bytes).unwrap();
        let decoded = decode_message(&schema, "Everything", &bytes).unwrap();

        // Implicit zeros are omitted on the wire, so the round-trip result
        // is the input minus its zero-valued entries.
        let expected: Record = record
            .into_iter()
            .filter(|(_, v)| !is_implicit_zero(v))
            .collect();
        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn reencoding_a_decoded_record_is_stable(
        small in any::<i32>(),
        big in any::<i64>(),
        text in "[a-z]{0,16}",
        ids in proptest::collection::vec(any::<i64>(), 0..8),
    ) {
        let schema = everything_schema();
        let record = build_record(
            false, small, big, 0, 0, 0, 0, 0, 0, 0.0, 0.0, text, Vec::new(),
            ids, Vec::new(),
        );

        let mut first = Vec::new();
        encode_message(&schema, "Everything", &record, &mut first).unwrap();
        let decoded = decode_message(&schema, "Everything", &first).unwrap();
        let mut second = Vec::new();
        encode_message(&schema, "Everything", &decoded, &mut second).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn packed_and_expanded_forms_decode_alike(
        ids in proptest::collection::vec(any::<i32>(), 1..8),
    ) {
        let descriptor = Descriptor::new("proto3").message(
            Message::new("M").field(Field::new("ids", 1, Type::named("int32")).repeated()),
        );
        let schema = compile(descriptor).unwrap();

        let record: Record = [(
            "ids".to_string(),
            Value::List(ids.iter().copied().map(|v| Value::Int(i64::from(v))).collect()),
        )]
        .into_iter()
        .collect();

        let mut packed = Vec::new();
        encode_message(&schema, "M", &record, &mut packed).unwrap();

        // Hand-build the expanded form: one tagged varint per element.
        let singular = compile(Descriptor::new("proto3").message(
            Message::new("M").field(Field::new("ids", 1, Type::named("int32"))),
        ))
        .unwrap();
        let mut expanded = Vec::new();
        for id in &ids {
            if *id == 0 {
                // The singular encoder would omit zero; write the tagged
                // element directly.
                expanded.extend_from_slice(&[0x08, 0x00]);
                continue;
            }
            let one: Record = [("ids".to_string(), Value::Int(i64::from(*id)))]
                .into_iter()
                .collect();
            encode_message(&singular, "M", &one, &mut expanded).unwrap();
        }

        let from_packed = decode_message(&schema, "M", &packed).unwrap();
        let from_expanded = decode_message(&schema, "M", &expanded).unwrap();
        prop_assert_eq!(from_packed, from_expanded);
    }
}
