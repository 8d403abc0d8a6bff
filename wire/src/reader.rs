//! Bounds-checked cursor for decoding the protobuf wire format.

use crate::error::{WireError, WireResult};
use crate::kind::{WireKind, MAX_VARINT_BYTES};

/// A cursor over an immutable byte slice.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Creates a new `WireReader` over a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Reads a base-128 varint.
    ///
    /// Fails with [`WireError::MalformedVarint`] if 10 bytes pass without a
    /// terminating byte or the input ends mid-varint.
    pub fn read_varint(&mut self) -> WireResult<u64> {
        let mut result = 0u64;
        for i in 0..MAX_VARINT_BYTES {
            let Some(&byte) = self.data.get(self.pos + i) else {
                return Err(WireError::MalformedVarint);
            };
            // The tenth byte may only carry the final bit of a u64.
            if i == MAX_VARINT_BYTES - 1 && byte > 0x01 {
                return Err(WireError::MalformedVarint);
            }
            result |= u64::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                self.pos += i + 1;
                return Ok(result);
            }
        }
        Err(WireError::MalformedVarint)
    }

    /// Reads a little-endian 32-bit value.
    pub fn read_fixed32(&mut self) -> WireResult<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a little-endian 64-bit value.
    pub fn read_fixed64(&mut self) -> WireResult<u64> {
        let bytes = self.take(8)?;
        let mut out = [0u8; 8];
        out.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(out))
    }

    /// Reads a varint length prefix and then that many payload bytes.
    pub fn read_length_delimited(&mut self) -> WireResult<&'a [u8]> {
        let len = self.read_varint()?;
        let len = usize::try_from(len).map_err(|_| WireError::TruncatedInput {
            needed: usize::MAX,
            available: self.remaining(),
        })?;
        self.take(len)
    }

    /// Reads a field tag and splits it into `(field_number, wire_kind)`.
    pub fn read_tag(&mut self) -> WireResult<(u32, WireKind)> {
        let tag = self.read_varint()?;
        let raw_kind = (tag & 0x7) as u8;
        let kind = WireKind::from_raw(raw_kind)
            .ok_or(WireError::InvalidWireKind { raw: raw_kind })?;
        Ok(((tag >> 3) as u32, kind))
    }

    /// Skips one value of the given wire kind.
    ///
    /// This is the length rule used to tolerate unknown fields: one varint,
    /// 4 or 8 fixed bytes, or a length prefix plus that many bytes.
    pub fn skip_value(&mut self, kind: WireKind) -> WireResult<()> {
        match kind {
            WireKind::Varint => {
                self.read_varint()?;
            }
            WireKind::Fixed64 => {
                self.take(8)?;
            }
            WireKind::Bytes => {
                self.read_length_delimited()?;
            }
            WireKind::Fixed32 => {
                self.take(4)?;
            }
        }
        Ok(())
    }

    fn take(&mut self, len: usize) -> WireResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(WireError::TruncatedInput {
                needed: len,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}
