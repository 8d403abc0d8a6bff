//! The protobuf protocol backend.
//!
//! Couples a pluggable descriptor parser to the schema compiler and codec.
//! The schema source grammar lives behind [`DescriptorParser`]; this type
//! owns everything after parsing: compilation, buffer reuse, and the
//! marshal/unmarshal entry points.

use codec::{decode_message, encode_message, Record};
use schema::{compile, schema_hash, CompiledSchema, Descriptor, ParseError};

use crate::error::{ProtocolError, ProtocolResult};
use crate::pool::BufferPool;
use crate::Protocol;

/// Registry name for the protobuf backend.
pub const PROTOCOL_PROTOBUF: &str = "protobuf";

/// Turns textual schema source into a raw descriptor.
///
/// Implementations own the grammar; everything downstream of the descriptor
/// is handled here.
pub trait DescriptorParser: Send + Sync {
    fn parse(&self, source: &str) -> Result<Descriptor, ParseError>;
}

/// Schema-driven protobuf codec with pooled encode buffers.
pub struct ProtobufProtocol {
    parser: Box<dyn DescriptorParser>,
    schema: Option<CompiledSchema>,
    pool: BufferPool,
}

impl ProtobufProtocol {
    /// Creates a backend with no schema loaded.
    ///
    /// Marshal and unmarshal fail with [`ProtocolError::SchemaNotLoaded`]
    /// until [`Protocol::parse`] succeeds.
    #[must_use]
    pub fn new(parser: Box<dyn DescriptorParser>) -> Self {
        Self {
            parser,
            schema: None,
            pool: BufferPool::new(),
        }
    }

    /// The currently loaded schema, if any.
    #[must_use]
    pub fn schema(&self) -> Option<&CompiledSchema> {
        self.schema.as_ref()
    }

    /// Fingerprint of the loaded schema, for peer comparison.
    #[must_use]
    pub fn schema_hash(&self) -> Option<u64> {
        self.schema.as_ref().map(schema_hash)
    }

    /// Number of idle encode buffers held by the pool.
    #[must_use]
    pub fn idle_buffers(&self) -> usize {
        self.pool.idle()
    }
}

impl Protocol for ProtobufProtocol {
    /// Parses and compiles schema source, replacing any loaded schema.
    ///
    /// On failure the previously loaded schema stays in effect.
    fn parse(&mut self, source: &str) -> ProtocolResult<()> {
        let descriptor = self.parser.parse(source)?;
        self.schema = Some(compile(descriptor)?);
        Ok(())
    }

    fn marshal(&self, message: &str, record: &Record) -> ProtocolResult<Vec<u8>> {
        let schema = self.schema.as_ref().ok_or(ProtocolError::SchemaNotLoaded)?;
        let mut buf = self.pool.acquire();
        encode_message(schema, message, record, &mut buf)?;
        // Copy out so the buffer's capacity stays with the pool.
        Ok(buf.to_vec())
    }

    fn unmarshal(&self, message: &str, bytes: &[u8]) -> ProtocolResult<Record> {
        let schema = self.schema.as_ref().ok_or(ProtocolError::SchemaNotLoaded)?;
        Ok(decode_message(schema, message, bytes)?)
    }
}
