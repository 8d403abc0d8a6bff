use wire::{unzigzag64, zigzag32, zigzag64, WireKind, WireReader, WireWriter};

#[test]
fn varint_roundtrip_boundaries() {
    let values = [
        0u64,
        1,
        127,
        128,
        300,
        16_383,
        16_384,
        u64::from(u32::MAX),
        u64::MAX,
    ];

    for value in values {
        let mut writer = WireWriter::new();
        writer.put_varint(value);
        let bytes = writer.finish();

        let mut reader = WireReader::new(&bytes);
        assert_eq!(reader.read_varint().unwrap(), value, "value {value}");
        assert!(reader.is_empty());
    }
}

#[test]
fn zigzag_varint_roundtrip() {
    for n in [0i64, -1, 1, -300, 300, i64::MIN, i64::MAX] {
        let mut writer = WireWriter::new();
        writer.put_varint(zigzag64(n));
        let bytes = writer.finish();

        let mut reader = WireReader::new(&bytes);
        assert_eq!(unzigzag64(reader.read_varint().unwrap()), n);
    }
}

#[test]
fn negative_one_sint32_is_one_byte() {
    let mut writer = WireWriter::new();
    writer.put_varint(zigzag32(-1));
    assert_eq!(writer.finish(), vec![0x01]);
}

#[test]
fn mixed_stream_roundtrip() {
    let mut writer = WireWriter::new();
    writer.put_tag(1, WireKind::Varint);
    writer.put_varint(42);
    writer.put_tag(2, WireKind::Fixed64);
    writer.put_fixed64(f64::to_bits(2.5));
    writer.put_tag(3, WireKind::Bytes);
    writer.put_length_delimited(b"payload");
    writer.put_tag(4, WireKind::Fixed32);
    writer.put_fixed32(7);
    let bytes = writer.finish();

    let mut reader = WireReader::new(&bytes);
    assert_eq!(reader.read_tag().unwrap(), (1, WireKind::Varint));
    assert_eq!(reader.read_varint().unwrap(), 42);
    assert_eq!(reader.read_tag().unwrap(), (2, WireKind::Fixed64));
    assert_eq!(f64::from_bits(reader.read_fixed64().unwrap()), 2.5);
    assert_eq!(reader.read_tag().unwrap(), (3, WireKind::Bytes));
    assert_eq!(reader.read_length_delimited().unwrap(), b"payload");
    assert_eq!(reader.read_tag().unwrap(), (4, WireKind::Fixed32));
    assert_eq!(reader.read_fixed32().unwrap(), 7);
    assert!(reader.is_empty());
}

#[test]
fn skip_walks_a_whole_record() {
    let mut writer = WireWriter::new();
    writer.put_tag(9, WireKind::Varint);
    writer.put_varint(1_000_000);
    writer.put_tag(10, WireKind::Bytes);
    writer.put_length_delimited(&[0xAB; 32]);
    writer.put_tag(11, WireKind::Fixed32);
    writer.put_fixed32(0xDEAD_BEEF);
    let bytes = writer.finish();

    let mut reader = WireReader::new(&bytes);
    while !reader.is_empty() {
        let (_, kind) = reader.read_tag().unwrap();
        reader.skip_value(kind).unwrap();
    }
    assert!(reader.is_empty());
}
