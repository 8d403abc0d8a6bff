//! Deterministic schema hashing.
//!
//! Two processes exchanging wire bytes can compare fingerprints to confirm
//! they compiled the same schema. The hash covers everything that affects
//! wire layout: message names, field tags, scalar kinds, repeatedness, and
//! enum values. HashMap iteration order never leaks in; all walks are sorted.

use blake3::Hasher;

use crate::compile::{CompiledMessage, CompiledSchema, ScalarKind};

/// Computes a deterministic fingerprint of a compiled schema.
#[must_use]
pub fn schema_hash(schema: &CompiledSchema) -> u64 {
    let mut hasher = Hasher::new();

    let mut message_names: Vec<&String> = schema.messages.keys().collect();
    message_names.sort();
    write_u32(&mut hasher, message_names.len() as u32);
    for name in message_names {
        write_str(&mut hasher, name);
        write_message(&mut hasher, &schema.messages[name]);
    }

    let mut enum_names: Vec<&String> = schema.enums.keys().collect();
    enum_names.sort();
    write_u32(&mut hasher, enum_names.len() as u32);
    for name in enum_names {
        write_str(&mut hasher, name);
        let enumeration = &schema.enums[name];
        let mut value_names: Vec<&String> = enumeration.values.keys().collect();
        value_names.sort();
        write_u32(&mut hasher, value_names.len() as u32);
        for value_name in value_names {
            write_str(&mut hasher, value_name);
            write_i64(&mut hasher, enumeration.values[value_name].value);
        }
    }

    let hash = hasher.finalize();
    let bytes = hash.as_bytes();
    u64::from_le_bytes(bytes[0..8].try_into().unwrap_or([0; 8]))
}

fn write_message(hasher: &mut Hasher, message: &CompiledMessage) {
    write_u32(hasher, message.order.len() as u32);
    for field_name in &message.order {
        let field = &message.fields[field_name];
        write_str(hasher, &field.name);
        write_u32(hasher, field.tag);
        write_u8(hasher, u8::from(field.repeated));
        write_u8(hasher, u8::from(field.packed));
        write_scalar(hasher, &field.scalar);
    }
}

fn write_scalar(hasher: &mut Hasher, scalar: &ScalarKind) {
    match scalar {
        ScalarKind::Bool => write_u8(hasher, 0),
        ScalarKind::Int32 => write_u8(hasher, 1),
        ScalarKind::Int64 => write_u8(hasher, 2),
        ScalarKind::UInt32 => write_u8(hasher, 3),
        ScalarKind::UInt64 => write_u8(hasher, 4),
        ScalarKind::Sint32 => write_u8(hasher, 5),
        ScalarKind::Sint64 => write_u8(hasher, 6),
        ScalarKind::Fixed32 => write_u8(hasher, 7),
        ScalarKind::Sfixed32 => write_u8(hasher, 8),
        ScalarKind::Fixed64 => write_u8(hasher, 9),
        ScalarKind::Sfixed64 => write_u8(hasher, 10),
        ScalarKind::Float => write_u8(hasher, 11),
        ScalarKind::Double => write_u8(hasher, 12),
        ScalarKind::String => write_u8(hasher, 13),
        ScalarKind::Bytes => write_u8(hasher, 14),
        ScalarKind::Enum(name) => {
            write_u8(hasher, 15);
            write_str(hasher, name);
        }
        ScalarKind::Message(name) => {
            write_u8(hasher, 16);
            write_str(hasher, name);
        }
        ScalarKind::Unsupported(name) => {
            write_u8(hasher, 17);
            write_str(hasher, name);
        }
    }
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}

fn write_i64(hasher: &mut Hasher, value: i64) {
    hasher.update(&value.to_le_bytes());
}
