//! Integration tests for derive macros.

use streamcast::{
    count, DeriveFromStream, DeriveStreamable, DeriveToStream, FromStream, Stream, StreamError,
    StreamReader, StreamWriter, Streamable, ToStream,
};

fn encode<T: ToStream>(value: &T) -> Stream {
    let mut stream = Stream::new();
    StreamWriter::new(&mut stream).write(value).unwrap();
    stream
}

fn roundtrip<T: ToStream + FromStream + PartialEq + std::fmt::Debug>(value: &T) {
    let mut stream = encode(value);
    assert_eq!(stream.len(), value.parse_size());

    let back: T = StreamReader::new(&mut stream).read().unwrap();
    assert_eq!(&back, value);
}

// =============================================================================
// Streamable derive (framed compounds)
// =============================================================================

#[derive(DeriveStreamable, Debug, Default, PartialEq)]
struct UnitConfig;

#[test]
fn streamable_unit_struct() {
    let value = UnitConfig;
    assert_eq!(Streamable::find_parse_size(&value), 0);
    // just the empty frame prefix
    assert_eq!(value.parse_size(), count::encoded_size(0));
    roundtrip(&value);
}

#[derive(DeriveStreamable, Debug, Default, PartialEq)]
struct SimpleConfig {
    a: u32,
    b: u16,
}

#[test]
fn streamable_simple_struct() {
    let value = SimpleConfig {
        a: 0x1234_5678,
        b: 0xABCD,
    };

    assert_eq!(Streamable::find_parse_size(&value), 6); // 4 + 2
    assert_eq!(value.parse_size(), count::encoded_size(6) + 6);

    let mut stream = encode(&value);
    let mut reader = StreamReader::new(&mut stream);
    assert_eq!(reader.read_count().unwrap(), 6);

    roundtrip(&value);
}

#[derive(DeriveStreamable, Debug, Default, PartialEq)]
struct PackedPair(u32, u8);

#[test]
fn streamable_tuple_struct() {
    let value = PackedPair(42, 7);
    assert_eq!(Streamable::find_parse_size(&value), 5); // 4 + 1
    roundtrip(&value);
}

#[derive(DeriveStreamable, Debug, Default, PartialEq)]
struct NestedConfig {
    inner: SimpleConfig,
    flag: bool,
}

#[test]
fn streamable_nested_struct_frames_recursively() {
    let value = NestedConfig {
        inner: SimpleConfig { a: 100, b: 200 },
        flag: true,
    };

    // the inner compound arrives framed: prefix + 6-byte body
    let inner_size = count::encoded_size(6) + 6;
    assert_eq!(Streamable::find_parse_size(&value), inner_size + 1);
    roundtrip(&value);
}

#[derive(DeriveStreamable, Debug, Default, PartialEq)]
struct WithRanges {
    name: String,
    samples: Vec<f64>,
    comment: Option<String>,
}

#[test]
fn streamable_with_ranges() {
    roundtrip(&WithRanges {
        name: String::from("sensor-7"),
        samples: vec![512.0, 52.0, 77.0, 42321.0],
        comment: Some(String::from("calibrated")),
    });

    roundtrip(&WithRanges::default());
}

#[derive(DeriveStreamable, Debug, Default, PartialEq)]
struct WithSkipped {
    kept: u32,
    #[streamcast(skip)]
    cache: Option<u64>,
    marker: std::marker::PhantomData<()>,
}

#[test]
fn skipped_fields_are_neither_written_nor_read() {
    let value = WithSkipped {
        kept: 9,
        cache: Some(0xDEAD),
        marker: std::marker::PhantomData,
    };

    // only `kept` travels
    assert_eq!(Streamable::find_parse_size(&value), 4);

    let mut stream = encode(&value);
    let back: WithSkipped = StreamReader::new(&mut stream).read().unwrap();
    assert_eq!(back.kept, 9);
    assert_eq!(back.cache, None);
}

#[test]
fn streamable_works_inside_ranges() {
    let values = vec![
        SimpleConfig { a: 1, b: 2 },
        SimpleConfig { a: 3, b: 4 },
    ];
    roundtrip(&values);
}

#[test]
fn streamable_fill_in_place() {
    let value = SimpleConfig { a: 77, b: 8 };

    let mut stream = Stream::new();
    StreamWriter::new(&mut stream)
        .write_streamable(&value)
        .unwrap();

    let mut target = SimpleConfig::default();
    StreamReader::new(&mut stream)
        .read_streamable_into(&mut target)
        .unwrap();
    assert_eq!(target, value);
}

// =============================================================================
// ToStream/FromStream derive on structs (unframed products)
// =============================================================================

#[derive(DeriveToStream, DeriveFromStream, Debug, PartialEq)]
struct PlainProduct {
    x: i32,
    y: i32,
}

#[test]
fn plain_struct_has_no_frame() {
    let value = PlainProduct { x: -10, y: 20 };
    assert_eq!(value.parse_size(), 8); // no prefix
    roundtrip(&value);
}

// =============================================================================
// ToStream/FromStream derive on enums (tagged variants)
// =============================================================================

#[derive(DeriveToStream, DeriveFromStream, Debug, PartialEq)]
enum UnitChoice {
    A,
    B,
    C,
}

#[test]
fn unit_enum_tags_are_variant_indices() {
    for (i, value) in [UnitChoice::A, UnitChoice::B, UnitChoice::C]
        .iter()
        .enumerate()
    {
        assert_eq!(value.parse_size(), 1);

        let mut stream = encode(value);
        assert_eq!(stream.read(1), [i as u8]);
    }

    roundtrip(&UnitChoice::B);
}

#[derive(DeriveToStream, DeriveFromStream, Debug, PartialEq)]
enum Payload {
    Empty,
    Single(u32),
    Double(u16, u8),
}

#[test]
fn tuple_variants() {
    let value = Payload::Empty;
    assert_eq!(value.parse_size(), 1);
    roundtrip(&value);

    let value = Payload::Single(0x1234_5678);
    assert_eq!(value.parse_size(), 5); // 1 + 4
    roundtrip(&value);

    let value = Payload::Double(0xABCD, 0x42);
    assert_eq!(value.parse_size(), 4); // 1 + 2 + 1
    roundtrip(&value);
}

#[derive(DeriveToStream, DeriveFromStream, Debug, PartialEq)]
enum Event {
    Quiet,
    Moved { x: i32, y: i32 },
    Named { id: u8, value: u64 },
}

#[test]
fn struct_variants() {
    roundtrip(&Event::Quiet);
    roundtrip(&Event::Moved { x: -10, y: 20 });
    roundtrip(&Event::Named {
        id: 42,
        value: 0x1234_5678_9ABC_DEF0,
    });
}

#[test]
fn enum_invalid_discriminant() {
    let mut stream = Stream::new();
    StreamWriter::new(&mut stream).write_count(255);

    let err = StreamReader::new(&mut stream)
        .read::<UnitChoice>()
        .unwrap_err();
    assert_eq!(err, StreamError::InvalidTag { tag: 255, limit: 3 });
}

#[test]
fn enums_nest_in_ranges_and_compounds() {
    let values = vec![Payload::Single(1), Payload::Empty, Payload::Double(2, 3)];
    roundtrip(&values);

    #[derive(DeriveStreamable, Debug, Default, PartialEq)]
    struct Envelope {
        id: u64,
        event: Option<u32>,
    }

    roundtrip(&Envelope {
        id: 7,
        event: Some(13),
    });
}
