//! Protocol registry and codec front end for protodyn.
//!
//! A [`Protocol`] bundles the full lifecycle of a schema-driven codec:
//! parse schema source, then marshal and unmarshal named messages against
//! it. Backends register constructor functions by name so callers can be
//! wired up with a string from configuration.
//!
//! # Example
//!
//! ```no_run
//! use codec::{Record, Value};
//! use protocol::{create, Protocol, ProtocolResult};
//!
//! fn send_pet(source: &str) -> ProtocolResult<Vec<u8>> {
//!     let mut proto = create("protobuf")?;
//!     proto.parse(source)?;
//!
//!     let mut pet = Record::new();
//!     pet.insert("name".to_string(), Value::from("xiaoqiang"));
//!     proto.marshal("Pet", &pet)
//! }
//! ```

mod error;
mod pool;
mod protobuf;
mod registry;

pub use error::{ProtocolError, ProtocolResult};
pub use pool::{BufferPool, PooledBuf};
pub use protobuf::{DescriptorParser, ProtobufProtocol, PROTOCOL_PROTOBUF};
pub use registry::{create, names, register, ProtocolFactory, Registry};

use codec::Record;

/// A named codec backend: schema loading plus marshal/unmarshal.
///
/// Implementations are `Send + Sync`; marshal and unmarshal take `&self`
/// and may run concurrently once a schema is loaded.
pub trait Protocol: Send + Sync {
    /// Loads a schema from textual source, replacing any previous one.
    fn parse(&mut self, source: &str) -> ProtocolResult<()>;

    /// Marshals a record of the named message to wire bytes.
    fn marshal(&self, message: &str, record: &Record) -> ProtocolResult<Vec<u8>>;

    /// Unmarshals wire bytes of the named message into a record.
    fn unmarshal(&self, message: &str, bytes: &[u8]) -> ProtocolResult<Record>;
}

impl core::fmt::Debug for dyn Protocol + '_ {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("dyn Protocol")
    }
}
