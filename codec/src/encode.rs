//! Record marshaling.
//!
//! Walks a compiled message's fields in ascending tag order, coerces each
//! present record value, and writes tag codes and values to the wire. Zero
//! valued singular scalars are skipped entirely (proto3 implicit presence):
//! the wire cannot distinguish "set to zero" from "absent".

use schema::{CompiledField, CompiledMessage, CompiledSchema, ScalarKind};
use wire::{zigzag32, zigzag64, WireKind, WireWriter};

use crate::coerce;
use crate::error::{CodecError, CodecResult, ValueReason};
use crate::value::{Record, Value};

/// Marshals a record into wire bytes, appending to `out`.
///
/// On any error nothing is appended; partial output never escapes.
pub fn encode_message(
    schema: &CompiledSchema,
    name: &str,
    record: &Record,
    out: &mut Vec<u8>,
) -> CodecResult<()> {
    let message = schema
        .message(name)
        .ok_or_else(|| CodecError::MessageNotFound {
            name: name.to_string(),
        })?;

    let mut writer = WireWriter::new();
    encode_into(schema, message, record, &mut writer)?;
    writer.finish_into(out);
    Ok(())
}

fn encode_into(
    schema: &CompiledSchema,
    message: &CompiledMessage,
    record: &Record,
    writer: &mut WireWriter,
) -> CodecResult<()> {
    for field_name in &message.order {
        let Some(field) = message.field(field_name) else {
            continue;
        };
        let Some(value) = record.get(field_name) else {
            continue;
        };
        encode_field(schema, &message.name, field, value, writer)?;
    }
    Ok(())
}

fn encode_field(
    schema: &CompiledSchema,
    message_name: &str,
    field: &CompiledField,
    value: &Value,
    writer: &mut WireWriter,
) -> CodecResult<()> {
    if let ScalarKind::Unsupported(type_name) = &field.scalar {
        return Err(CodecError::UnsupportedField {
            message: message_name.to_string(),
            field: field.name.clone(),
            type_name: type_name.clone(),
        });
    }

    if field.repeated {
        return encode_repeated(schema, field, value, writer);
    }

    match &field.scalar {
        ScalarKind::String => {
            let s = coerce::to_str(value).map_err(|reason| invalid(field, reason))?;
            if s.is_empty() {
                return Ok(());
            }
            writer.put_raw(&field.tag_code);
            writer.put_length_delimited(s.as_bytes());
        }
        ScalarKind::Bytes => {
            let bytes = coerce::to_bytes(value).map_err(|reason| invalid(field, reason))?;
            if bytes.is_empty() {
                return Ok(());
            }
            writer.put_raw(&field.tag_code);
            writer.put_length_delimited(&bytes);
        }
        ScalarKind::Message(sub_name) => {
            let sub_record = coerce::to_record(value).map_err(|reason| invalid(field, reason))?;
            let payload = encode_embedded(schema, sub_name, sub_record)?;
            writer.put_raw(&field.tag_code);
            writer.put_length_delimited(payload.as_slice());
        }
        numeric => {
            let raw = coerce_raw(numeric, value).map_err(|reason| invalid(field, reason))?;
            // Implicit presence: the zero value is never written. Negative
            // float zero has a non-zero bit pattern and is written.
            if raw == 0 {
                return Ok(());
            }
            writer.put_raw(&field.tag_code);
            encode_raw(writer, field.wire, raw);
        }
    }
    Ok(())
}

fn encode_repeated(
    schema: &CompiledSchema,
    field: &CompiledField,
    value: &Value,
    writer: &mut WireWriter,
) -> CodecResult<()> {
    let elements = coerce::to_list(value).map_err(|reason| invalid(field, reason))?;
    if elements.is_empty() {
        return Ok(());
    }

    match &field.scalar {
        ScalarKind::String => {
            // Coerce everything first so failure cannot leave partial output.
            let mut strings = Vec::with_capacity(elements.len());
            for element in elements {
                strings.push(coerce::to_str(element).map_err(|reason| invalid(field, reason))?);
            }
            for s in strings {
                writer.put_raw(&field.tag_code);
                writer.put_length_delimited(s.as_bytes());
            }
        }
        ScalarKind::Bytes => {
            let mut payloads = Vec::with_capacity(elements.len());
            for element in elements {
                payloads.push(coerce::to_bytes(element).map_err(|reason| invalid(field, reason))?);
            }
            for payload in payloads {
                writer.put_raw(&field.tag_code);
                writer.put_length_delimited(&payload);
            }
        }
        ScalarKind::Message(sub_name) => {
            let mut payloads = Vec::with_capacity(elements.len());
            for element in elements {
                let sub_record =
                    coerce::to_record(element).map_err(|reason| invalid(field, reason))?;
                payloads.push(encode_embedded(schema, sub_name, sub_record)?);
            }
            for payload in payloads {
                writer.put_raw(&field.tag_code);
                writer.put_length_delimited(payload.as_slice());
            }
        }
        numeric => {
            let mut raws = Vec::with_capacity(elements.len());
            for element in elements {
                raws.push(coerce_raw(numeric, element).map_err(|reason| invalid(field, reason))?);
            }
            // Packed: one tag, one length-delimited run of element encodings.
            let mut payload = WireWriter::new();
            for raw in raws {
                encode_raw(&mut payload, field.wire, raw);
            }
            writer.put_raw(&field.tag_code);
            writer.put_length_delimited(payload.as_slice());
        }
    }
    Ok(())
}

fn encode_embedded(
    schema: &CompiledSchema,
    name: &str,
    record: &Record,
) -> CodecResult<WireWriter> {
    let message = schema
        .message(name)
        .ok_or_else(|| CodecError::MessageNotFound {
            name: name.to_string(),
        })?;
    let mut writer = WireWriter::new();
    encode_into(schema, message, record, &mut writer)?;
    Ok(writer)
}

/// Coerces a value to the raw 64-bit wire representation of a numeric or
/// bool scalar. Sign extension gives negative int32/int64/enum values their
/// canonical 10-byte varint encoding.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn coerce_raw(scalar: &ScalarKind, value: &Value) -> Result<u64, ValueReason> {
    let raw = match scalar {
        ScalarKind::Bool => u64::from(coerce::to_bool(value)?),
        ScalarKind::Int32 | ScalarKind::Enum(_) => {
            (i64::from(coerce::to_i64(value)? as i32)) as u64
        }
        ScalarKind::Int64 => coerce::to_i64(value)? as u64,
        ScalarKind::UInt32 => u64::from(coerce::to_u64(value)? as u32),
        ScalarKind::UInt64 => coerce::to_u64(value)?,
        ScalarKind::Sint32 => zigzag32(coerce::to_i64(value)? as i32),
        ScalarKind::Sint64 => zigzag64(coerce::to_i64(value)?),
        ScalarKind::Fixed32 => u64::from(coerce::to_u64(value)? as u32),
        ScalarKind::Fixed64 => coerce::to_u64(value)?,
        ScalarKind::Sfixed32 => u64::from((coerce::to_i64(value)? as i32) as u32),
        ScalarKind::Sfixed64 => coerce::to_i64(value)? as u64,
        ScalarKind::Float => u64::from((coerce::to_f64(value)? as f32).to_bits()),
        ScalarKind::Double => coerce::to_f64(value)?.to_bits(),
        // String/Bytes/Message/Unsupported are handled before this point.
        _ => {
            return Err(ValueReason::TypeMismatch {
                expected: "a numeric value",
                found: value.type_name(),
            })
        }
    };
    Ok(raw)
}

#[allow(clippy::cast_possible_truncation)]
fn encode_raw(writer: &mut WireWriter, wire: WireKind, raw: u64) {
    match wire {
        // Length-prefix varints share the varint value encoder.
        WireKind::Varint | WireKind::Bytes => writer.put_varint(raw),
        WireKind::Fixed64 => writer.put_fixed64(raw),
        WireKind::Fixed32 => writer.put_fixed32(raw as u32),
    }
}

fn invalid(field: &CompiledField, reason: ValueReason) -> CodecError {
    CodecError::InvalidFieldValue {
        field: field.name.clone(),
        reason,
    }
}
