//! Record unmarshaling.
//!
//! Reads tag/value pairs until the input is exhausted. Tags are dispatched
//! through the message's tag index; tags the schema does not know are
//! skipped by wire-kind length rules, so schema evolution does not break
//! old readers. Absent fields stay absent in the output record.

use schema::{CompiledField, CompiledMessage, CompiledSchema, ScalarKind};
use wire::{unzigzag32, unzigzag64, WireKind, WireReader};

use crate::error::{CodecError, CodecResult};
use crate::value::{Record, Value};

/// Unmarshals wire bytes into a record.
///
/// Repeated fields accumulate into lists in arrival order. A singular field
/// seen more than once keeps the last occurrence.
pub fn decode_message(
    schema: &CompiledSchema,
    name: &str,
    bytes: &[u8],
) -> CodecResult<Record> {
    let message = schema
        .message(name)
        .ok_or_else(|| CodecError::MessageNotFound {
            name: name.to_string(),
        })?;
    decode_into(schema, message, bytes)
}

fn decode_into(
    schema: &CompiledSchema,
    message: &CompiledMessage,
    bytes: &[u8],
) -> CodecResult<Record> {
    let mut reader = WireReader::new(bytes);
    let mut record = Record::new();

    while !reader.is_empty() {
        let (tag, kind) = reader.read_tag()?;
        let Some(field) = message.field_by_tag(tag) else {
            reader.skip_value(kind)?;
            continue;
        };

        if let ScalarKind::Unsupported(type_name) = &field.scalar {
            return Err(CodecError::UnsupportedField {
                message: message.name.clone(),
                field: field.name.clone(),
                type_name: type_name.clone(),
            });
        }

        if field.repeated {
            decode_repeated(schema, field, kind, &mut reader, &mut record)?;
        } else {
            let value = decode_singular(schema, field, kind, &mut reader)?;
            record.insert(field.name.clone(), value);
        }
    }

    Ok(record)
}

fn decode_singular(
    schema: &CompiledSchema,
    field: &CompiledField,
    kind: WireKind,
    reader: &mut WireReader<'_>,
) -> CodecResult<Value> {
    if kind != field.wire {
        return Err(unexpected(field, kind));
    }
    match &field.scalar {
        ScalarKind::String => decode_string(field, reader.read_length_delimited()?),
        ScalarKind::Bytes => Ok(Value::Bytes(reader.read_length_delimited()?.to_vec())),
        ScalarKind::Message(sub_name) => {
            let payload = reader.read_length_delimited()?;
            decode_embedded(schema, sub_name, payload)
        }
        numeric => {
            let raw = read_raw(reader, field.wire)?;
            Ok(decode_scalar(numeric, raw))
        }
    }
}

fn decode_repeated(
    schema: &CompiledSchema,
    field: &CompiledField,
    kind: WireKind,
    reader: &mut WireReader<'_>,
    record: &mut Record,
) -> CodecResult<()> {
    match &field.scalar {
        ScalarKind::String => {
            if kind != WireKind::Bytes {
                return Err(unexpected(field, kind));
            }
            let value = decode_string(field, reader.read_length_delimited()?)?;
            push_repeated(record, &field.name, value);
        }
        ScalarKind::Bytes => {
            if kind != WireKind::Bytes {
                return Err(unexpected(field, kind));
            }
            let payload = reader.read_length_delimited()?;
            push_repeated(record, &field.name, Value::Bytes(payload.to_vec()));
        }
        ScalarKind::Message(sub_name) => {
            if kind != WireKind::Bytes {
                return Err(unexpected(field, kind));
            }
            let payload = reader.read_length_delimited()?;
            push_repeated(record, &field.name, decode_embedded(schema, sub_name, payload)?);
        }
        numeric => {
            if kind == WireKind::Bytes {
                // Packed: subdivide one length-delimited run into elements.
                let payload = reader.read_length_delimited()?;
                let mut elements = WireReader::new(payload);
                while !elements.is_empty() {
                    let raw = read_raw(&mut elements, field.wire).map_err(|_| {
                        CodecError::MalformedPacked {
                            field: field.name.clone(),
                        }
                    })?;
                    push_repeated(record, &field.name, decode_scalar(numeric, raw));
                }
            } else if kind == field.wire {
                // Expanded form: one tagged element, tolerated for interop
                // with writers that never pack.
                let raw = read_raw(reader, field.wire)?;
                push_repeated(record, &field.name, decode_scalar(numeric, raw));
            } else {
                return Err(unexpected(field, kind));
            }
        }
    }
    Ok(())
}

fn decode_embedded(schema: &CompiledSchema, name: &str, payload: &[u8]) -> CodecResult<Value> {
    let message = schema
        .message(name)
        .ok_or_else(|| CodecError::MessageNotFound {
            name: name.to_string(),
        })?;
    Ok(Value::Record(decode_into(schema, message, payload)?))
}

fn decode_string(field: &CompiledField, payload: &[u8]) -> CodecResult<Value> {
    String::from_utf8(payload.to_vec())
        .map(Value::Str)
        .map_err(|_| CodecError::InvalidUtf8 {
            field: field.name.clone(),
        })
}

fn read_raw(reader: &mut WireReader<'_>, wire: WireKind) -> wire::WireResult<u64> {
    match wire {
        WireKind::Varint | WireKind::Bytes => reader.read_varint(),
        WireKind::Fixed64 => reader.read_fixed64(),
        WireKind::Fixed32 => reader.read_fixed32().map(u64::from),
    }
}

/// Maps a raw wire value to its canonical runtime variant: `Int` for signed
/// kinds and enums, `UInt` for unsigned kinds, `Float` for float/double.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn decode_scalar(scalar: &ScalarKind, raw: u64) -> Value {
    match scalar {
        ScalarKind::Bool => Value::Bool(raw != 0),
        ScalarKind::Int32 | ScalarKind::Enum(_) | ScalarKind::Sfixed32 => {
            Value::Int(i64::from(raw as u32 as i32))
        }
        ScalarKind::Int64 | ScalarKind::Sfixed64 => Value::Int(raw as i64),
        ScalarKind::Sint32 => Value::Int(i64::from(unzigzag32(raw as u32))),
        ScalarKind::Sint64 => Value::Int(unzigzag64(raw)),
        ScalarKind::Float => Value::Float(f64::from(f32::from_bits(raw as u32))),
        ScalarKind::Double => Value::Float(f64::from_bits(raw)),
        // UInt32, UInt64, Fixed32, Fixed64; the length-delimited and
        // unsupported kinds never reach here.
        _ => Value::UInt(raw),
    }
}

fn push_repeated(record: &mut Record, name: &str, value: Value) {
    let entry = record
        .entry(name.to_string())
        .or_insert_with(|| Value::List(Vec::new()));
    if let Value::List(items) = entry {
        items.push(value);
    }
}

fn unexpected(field: &CompiledField, found: WireKind) -> CodecError {
    CodecError::UnexpectedWireKind {
        field: field.name.clone(),
        expected: field.tag_kind(),
        found,
    }
}
