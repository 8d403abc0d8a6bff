//! Byte-level writer for the protobuf wire format.

use crate::kind::WireKind;

/// An append-only growable byte buffer producing wire-format output.
///
/// Writes cannot fail; call [`finish`](Self::finish) to take the accumulated
/// bytes.
#[derive(Debug, Default)]
pub struct WireWriter {
    bytes: Vec<u8>,
}

impl WireWriter {
    /// Creates a new empty `WireWriter`.
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates a new `WireWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the accumulated bytes without consuming the writer.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes a base-128 varint.
    ///
    /// This is the format for the int32, int64, uint32, uint64, bool, and
    /// enum protobuf types, and for every tag and length prefix.
    pub fn put_varint(&mut self, mut x: u64) {
        while x >= 0x80 {
            self.bytes.push((x as u8 & 0x7F) | 0x80);
            x >>= 7;
        }
        self.bytes.push(x as u8);
    }

    /// Writes a little-endian 32-bit value.
    ///
    /// This is the format for the fixed32, sfixed32, and float protobuf types.
    pub fn put_fixed32(&mut self, x: u32) {
        self.bytes.extend_from_slice(&x.to_le_bytes());
    }

    /// Writes a little-endian 64-bit value.
    ///
    /// This is the format for the fixed64, sfixed64, and double protobuf
    /// types.
    pub fn put_fixed64(&mut self, x: u64) {
        self.bytes.extend_from_slice(&x.to_le_bytes());
    }

    /// Writes a varint length prefix followed by the payload.
    ///
    /// This is the format for the string and bytes protobuf types, embedded
    /// messages, and packed repeated scalars.
    pub fn put_length_delimited(&mut self, payload: &[u8]) {
        self.put_varint(payload.len() as u64);
        self.bytes.extend_from_slice(payload);
    }

    /// Writes raw bytes with no prefix.
    pub fn put_raw(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Writes a field tag: `(field_number << 3) | wire_kind`, varint-encoded.
    pub fn put_tag(&mut self, field_number: u32, kind: WireKind) {
        self.put_varint((u64::from(field_number) << 3) | u64::from(kind.raw()));
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = WireWriter::new();
        assert!(writer.is_empty());
        assert_eq!(writer.len(), 0);
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn varint_single_byte() {
        let mut writer = WireWriter::new();
        writer.put_varint(0);
        writer.put_varint(1);
        writer.put_varint(127);
        assert_eq!(writer.finish(), vec![0x00, 0x01, 0x7F]);
    }

    #[test]
    fn varint_multi_byte() {
        let mut writer = WireWriter::new();
        writer.put_varint(300);
        assert_eq!(writer.finish(), vec![0xAC, 0x02]);
    }

    #[test]
    fn varint_max_is_ten_bytes() {
        let mut writer = WireWriter::new();
        writer.put_varint(u64::MAX);
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 10);
        assert_eq!(bytes, vec![0xFF; 9].into_iter().chain([0x01]).collect::<Vec<_>>());
    }

    #[test]
    fn fixed32_little_endian() {
        let mut writer = WireWriter::new();
        writer.put_fixed32(0x1234_5678);
        assert_eq!(writer.finish(), vec![0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn fixed64_little_endian() {
        let mut writer = WireWriter::new();
        writer.put_fixed64(0x0102_0304_0506_0708);
        assert_eq!(
            writer.finish(),
            vec![0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn length_delimited_prefixes_length() {
        let mut writer = WireWriter::new();
        writer.put_length_delimited(b"abc");
        assert_eq!(writer.finish(), vec![0x03, b'a', b'b', b'c']);
    }

    #[test]
    fn length_delimited_empty_payload() {
        let mut writer = WireWriter::new();
        writer.put_length_delimited(b"");
        assert_eq!(writer.finish(), vec![0x00]);
    }

    #[test]
    fn tag_low_field_number() {
        let mut writer = WireWriter::new();
        writer.put_tag(1, WireKind::Varint);
        writer.put_tag(2, WireKind::Bytes);
        assert_eq!(writer.finish(), vec![0x08, 0x12]);
    }

    #[test]
    fn tag_high_field_number_spans_bytes() {
        let mut writer = WireWriter::new();
        // Field 16 is the first tag needing two bytes: (16 << 3) = 128.
        writer.put_tag(16, WireKind::Varint);
        assert_eq!(writer.finish(), vec![0x80, 0x01]);
    }

    #[test]
    fn finish_into_appends() {
        let mut writer = WireWriter::new();
        writer.put_varint(1);
        let mut buf = vec![0xAA];
        writer.finish_into(&mut buf);
        assert_eq!(buf, vec![0xAA, 0x01]);
    }

    #[test]
    fn with_capacity_starts_empty() {
        let writer = WireWriter::with_capacity(64);
        assert!(writer.is_empty());
    }
}
