//! Schema compilation and parse errors.

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while compiling a descriptor.
///
/// All of these are fatal to the schema load: the caller must fix the source
/// and re-parse. A descriptor that failed compilation is consumed and cannot
/// be used for marshal/unmarshal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two messages or enums share a name after nested definitions were
    /// hoisted into the schema's global namespace.
    DuplicateDefinition { name: String },

    /// A field's type name resolves to no builtin scalar, enum, message, or
    /// recognized-but-unsupported shape.
    InvalidFieldType {
        message: String,
        field: String,
        type_name: String,
    },

    /// A field tag is outside the valid protobuf range.
    InvalidTag {
        message: String,
        field: String,
        tag: i64,
    },

    /// Two fields in the same message declare the same tag.
    DuplicateTag { message: String, tag: i64 },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateDefinition { name } => {
                write!(f, "duplicate definition of {name}")
            }
            Self::InvalidFieldType {
                message,
                field,
                type_name,
            } => {
                write!(f, "field {message}.{field} has unknown type {type_name}")
            }
            Self::InvalidTag {
                message,
                field,
                tag,
            } => {
                write!(f, "field {message}.{field} has invalid tag {tag}")
            }
            Self::DuplicateTag { message, tag } => {
                write!(f, "message {message} declares tag {tag} twice")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Error reported by the external schema parser.
///
/// The textual-schema grammar lives outside this crate; parsers surface
/// failures through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    /// Creates a parse error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}
