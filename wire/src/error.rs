//! Error types for wire-format operations.

use std::fmt;

/// Result type for wire-format operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors that can occur while decoding the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// A varint did not terminate within the maximum 10 bytes, or the input
    /// ended before the final byte.
    MalformedVarint,

    /// Fewer bytes remained than the value required.
    TruncatedInput {
        /// Number of bytes required.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A tag advertised a wire kind this codec does not accept.
    ///
    /// Raw values 3 and 4 are the deprecated group markers; 6 and 7 are
    /// unassigned.
    InvalidWireKind {
        /// The raw 3-bit wire kind from the tag.
        raw: u8,
    },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedVarint => {
                write!(f, "varint did not terminate within 10 bytes")
            }
            Self::TruncatedInput { needed, available } => {
                write!(
                    f,
                    "truncated input: need {needed} bytes, have {available}"
                )
            }
            Self::InvalidWireKind { raw } => {
                write!(f, "invalid wire kind {raw}")
            }
        }
    }
}

impl std::error::Error for WireError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_malformed_varint() {
        let msg = WireError::MalformedVarint.to_string();
        assert!(msg.contains("varint"), "should mention varint");
        assert!(msg.contains("10"), "should mention the byte limit");
    }

    #[test]
    fn error_display_truncated_input() {
        let err = WireError::TruncatedInput {
            needed: 8,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('8'), "should mention needed bytes");
        assert!(msg.contains('3'), "should mention available bytes");
    }

    #[test]
    fn error_display_invalid_wire_kind() {
        let err = WireError::InvalidWireKind { raw: 3 };
        let msg = err.to_string();
        assert!(msg.contains('3'), "should mention the raw kind");
    }

    #[test]
    fn error_equality() {
        let err1 = WireError::TruncatedInput {
            needed: 4,
            available: 0,
        };
        let err2 = WireError::TruncatedInput {
            needed: 4,
            available: 0,
        };
        let err3 = WireError::MalformedVarint;
        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<WireError>();
    }
}
