//! Loose value coercion.
//!
//! Converts an arbitrary runtime [`Value`] into the exact shape a field's
//! wire type requires. Numeric variants interconvert (widening or
//! truncating); everything else must match natively. Coercion is
//! deterministic and side-effect-free, and never fails on a well-typed
//! value.

use crate::error::ValueReason;
use crate::value::{Record, Value};

pub(crate) fn to_bool(value: &Value) -> Result<bool, ValueReason> {
    match value {
        Value::Bool(v) => Ok(*v),
        other => Err(mismatch("a bool", other)),
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn to_i64(value: &Value) -> Result<i64, ValueReason> {
    match value {
        Value::Int(v) => Ok(*v),
        Value::UInt(v) => Ok(*v as i64),
        Value::Float(v) => Ok(*v as i64),
        other => Err(mismatch("a numeric value", other)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_u64(value: &Value) -> Result<u64, ValueReason> {
    match value {
        Value::UInt(v) => Ok(*v),
        Value::Int(v) => Ok(*v as u64),
        Value::Float(v) => Ok(*v as u64),
        other => Err(mismatch("a numeric value", other)),
    }
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn to_f64(value: &Value) -> Result<f64, ValueReason> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Int(v) => Ok(*v as f64),
        Value::UInt(v) => Ok(*v as f64),
        other => Err(mismatch("a numeric value", other)),
    }
}

pub(crate) fn to_str(value: &Value) -> Result<&str, ValueReason> {
    match value {
        Value::Str(v) => Ok(v),
        other => Err(mismatch("a string", other)),
    }
}

/// Coerces to a byte sequence: native bytes, a UTF-8 string, or a list of
/// integers each in `[0, 255]`.
pub(crate) fn to_bytes(value: &Value) -> Result<Vec<u8>, ValueReason> {
    match value {
        Value::Bytes(v) => Ok(v.clone()),
        Value::Str(v) => Ok(v.as_bytes().to_vec()),
        Value::List(elements) => {
            let mut bytes = Vec::with_capacity(elements.len());
            for element in elements {
                bytes.push(to_byte(element)?);
            }
            Ok(bytes)
        }
        other => Err(mismatch("a byte sequence", other)),
    }
}

fn to_byte(value: &Value) -> Result<u8, ValueReason> {
    let n = match value {
        Value::Int(v) => *v,
        Value::UInt(v) => {
            i64::try_from(*v).map_err(|_| ValueReason::ByteOutOfRange { value: i64::MAX })?
        }
        other => return Err(mismatch("a byte sequence", other)),
    };
    u8::try_from(n).map_err(|_| ValueReason::ByteOutOfRange { value: n })
}

pub(crate) fn to_list(value: &Value) -> Result<&[Value], ValueReason> {
    match value {
        Value::List(v) => Ok(v),
        other => Err(mismatch("a list", other)),
    }
}

pub(crate) fn to_record(value: &Value) -> Result<&Record, ValueReason> {
    match value {
        Value::Record(v) => Ok(v),
        other => Err(mismatch("a record", other)),
    }
}

fn mismatch(expected: &'static str, found: &Value) -> ValueReason {
    ValueReason::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}
