//! Error types for marshal/unmarshal operations.

use std::fmt;

use wire::{WireError, WireKind};

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while marshaling or unmarshaling a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Wire-format error while decoding.
    Wire(WireError),

    /// The named message is not part of the compiled schema.
    MessageNotFound { name: String },

    /// The field compiled to a recognized but unsupported shape (map fields,
    /// well-known external types); its data cannot be encoded or decoded.
    UnsupportedField {
        message: String,
        field: String,
        type_name: String,
    },

    /// A record value could not be coerced to the field's required shape.
    InvalidFieldValue { field: String, reason: ValueReason },

    /// A known field arrived with a wire kind that matches neither its
    /// packed nor its element encoding.
    UnexpectedWireKind {
        field: String,
        expected: WireKind,
        found: WireKind,
    },

    /// A packed payload ended mid-element.
    MalformedPacked { field: String },

    /// A string field carried bytes that are not valid UTF-8.
    InvalidUtf8 { field: String },
}

/// Details for coercion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueReason {
    /// The value's runtime type cannot represent the field's shape.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A byte-sequence element was outside `[0, 255]`.
    ByteOutOfRange { value: i64 },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::MessageNotFound { name } => {
                write!(f, "no message named {name}")
            }
            Self::UnsupportedField {
                message,
                field,
                type_name,
            } => {
                write!(
                    f,
                    "field {message}.{field} has unsupported type {type_name}"
                )
            }
            Self::InvalidFieldValue { field, reason } => {
                write!(f, "invalid value for field {field}: {reason}")
            }
            Self::UnexpectedWireKind {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "field {field} expected wire kind {expected:?}, found {found:?}"
                )
            }
            Self::MalformedPacked { field } => {
                write!(f, "packed payload for field {field} ended mid-element")
            }
            Self::InvalidUtf8 { field } => {
                write!(f, "field {field} is not valid UTF-8")
            }
        }
    }
}

impl fmt::Display for ValueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected} but got {found}")
            }
            Self::ByteOutOfRange { value } => {
                write!(f, "byte element {value} outside [0, 255]")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WireError> for CodecError {
    fn from(err: WireError) -> Self {
        Self::Wire(err)
    }
}
