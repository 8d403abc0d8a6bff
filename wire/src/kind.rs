//! Wire kinds, tag arithmetic, and zigzag transforms.

/// Maximum encoded length of a varint in bytes.
pub const MAX_VARINT_BYTES: usize = 10;

/// The low-level encoding family a field's tag advertises.
///
/// The discriminants are the on-wire 3-bit values. The deprecated group
/// markers (3 and 4) are intentionally absent; tags carrying them are
/// rejected during decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireKind {
    /// Base-128 varint: int32, int64, uint32, uint64, sint32, sint64, bool,
    /// enum.
    Varint = 0,
    /// Little-endian 8 bytes: fixed64, sfixed64, double.
    Fixed64 = 1,
    /// Length-delimited: string, bytes, embedded messages, packed repeated
    /// scalars.
    Bytes = 2,
    /// Little-endian 4 bytes: fixed32, sfixed32, float.
    Fixed32 = 5,
}

impl WireKind {
    /// Converts a raw 3-bit tag value into a wire kind.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Varint),
            1 => Some(Self::Fixed64),
            2 => Some(Self::Bytes),
            5 => Some(Self::Fixed32),
            _ => None,
        }
    }

    /// Returns the raw 3-bit tag value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// Zigzag-encodes a 32-bit signed integer.
#[must_use]
pub const fn zigzag32(n: i32) -> u64 {
    // Arithmetic right shift spreads the sign bit across the word.
    (((n << 1) ^ (n >> 31)) as u32) as u64
}

/// Zigzag-encodes a 64-bit signed integer.
#[must_use]
pub const fn zigzag64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverts [`zigzag32`].
#[must_use]
pub const fn unzigzag32(u: u32) -> i32 {
    ((u >> 1) as i32) ^ -((u & 1) as i32)
}

/// Inverts [`zigzag64`].
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn unzigzag64(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}
