//! Error type covering the whole parse/compile/marshal pipeline.

use std::fmt;

use codec::CodecError;
use schema::{ParseError, SchemaError};

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors from protocol lookup and use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Marshal or unmarshal was called before any schema was parsed.
    SchemaNotLoaded,

    /// No factory is registered under the requested name.
    UnknownProtocol {
        name: String,
        /// Registered names, sorted, for the error message.
        available: Vec<String>,
    },

    /// The schema source failed to parse.
    Parse(ParseError),

    /// The parsed descriptor failed to compile.
    Schema(SchemaError),

    /// Marshal or unmarshal failed.
    Codec(CodecError),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaNotLoaded => {
                write!(f, "no schema loaded; call parse first")
            }
            Self::UnknownProtocol { name, available } => {
                write!(
                    f,
                    "unknown protocol {name}; registered: {}",
                    available.join(", ")
                )
            }
            Self::Parse(e) => write!(f, "{e}"),
            Self::Schema(e) => write!(f, "schema error: {e}"),
            Self::Codec(e) => write!(f, "codec error: {e}"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Schema(e) => Some(e),
            Self::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for ProtocolError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<SchemaError> for ProtocolError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

impl From<CodecError> for ProtocolError {
    fn from(err: CodecError) -> Self {
        Self::Codec(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_schema_not_loaded() {
        assert!(ProtocolError::SchemaNotLoaded.to_string().contains("parse"));
    }

    #[test]
    fn display_unknown_protocol_lists_registered() {
        let err = ProtocolError::UnknownProtocol {
            name: "msgpack".to_string(),
            available: vec!["json".to_string(), "protobuf".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("msgpack"));
        assert!(msg.contains("json, protobuf"));
    }

    #[test]
    fn wrapped_errors_convert_and_chain() {
        let err: ProtocolError = ParseError::new("bad token").into();
        assert!(std::error::Error::source(&err).is_some());

        let err: ProtocolError = SchemaError::DuplicateDefinition {
            name: "Pet".to_string(),
        }
        .into();
        assert!(err.to_string().contains("Pet"));

        let err: ProtocolError = CodecError::MessageNotFound {
            name: "Pet".to_string(),
        }
        .into();
        assert!(matches!(err, ProtocolError::Codec(_)));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<ProtocolError>();
    }
}
