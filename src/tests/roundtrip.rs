use alloc::collections::{BTreeMap, BTreeSet, LinkedList};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::mem::size_of;

use crate::{count, FromStream, Result, Stream, StreamError, StreamReader, StreamWriter, ToStream};

fn encode<T: ToStream>(value: &T) -> Stream {
    let mut stream = Stream::new();
    StreamWriter::new(&mut stream).write(value).unwrap();
    stream
}

/// Round-trips `value` and checks the length-agreement invariant on the
/// way.
fn roundtrip<T: ToStream + FromStream + PartialEq + Debug>(value: &T) {
    let mut stream = encode(value);
    assert_eq!(stream.len(), value.parse_size(), "length agreement");

    let back: T = StreamReader::new(&mut stream).read().unwrap();
    assert_eq!(&back, value);
    assert_eq!(stream.remaining(), 0, "decode consumed everything");
}

// One-byte alternatives in the spirit of `enum class : uint8_t`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Flag {
    None,
    Nothing,
    Nada,
}

impl ToStream for Flag {
    fn parse_size(&self) -> usize {
        count::encoded_size(*self as u64)
    }

    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        w.write_count(*self as u64);
        Ok(())
    }
}

impl FromStream for Flag {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        match r.read_count()? {
            0 => Ok(Self::None),
            1 => Ok(Self::Nothing),
            2 => Ok(Self::Nada),
            tag => Err(StreamError::InvalidTag { tag, limit: 3 }),
        }
    }
}

#[test]
fn plain_int() {
    let i = 42i32;
    assert_eq!(i32::RANK, 0);
    assert_eq!(i.parse_size(), size_of::<i32>());
    roundtrip(&i);
}

#[test]
fn bit_copy_width_equals_size_of() {
    assert_eq!(7u8.parse_size(), 1);
    assert_eq!(7u16.parse_size(), 2);
    assert_eq!((-7i64).parse_size(), 8);
    assert_eq!(7u128.parse_size(), 16);
    assert_eq!(1.5f32.parse_size(), 4);
    assert_eq!(7usize.parse_size(), size_of::<usize>());

    roundtrip(&0x0123_4567_89AB_CDEFu64);
    roundtrip(&-42i8);
    roundtrip(&3.25f32);
    roundtrip(&f64::NEG_INFINITY);
}

#[test]
fn list_of_pairs() {
    let list: LinkedList<(i32, f32)> = [(22, 14.0), (93, 32.0)].into_iter().collect();
    assert_eq!(LinkedList::<(i32, f32)>::RANK, 1);
    assert_eq!(
        list.parse_size(),
        count::encoded_size(2) + 2 * (size_of::<i32>() + size_of::<f32>())
    );
    roundtrip(&list);
}

#[test]
fn vector_of_doubles() {
    let v = vec![512.0f64, 52.0, 77.0, 42321.0];
    assert_eq!(Vec::<f64>::RANK, 1);
    assert_eq!(
        v.parse_size(),
        count::encoded_size(4) + 4 * size_of::<f64>()
    );
    roundtrip(&v);
}

#[test]
fn list_of_vectors_of_flags() {
    let lv: LinkedList<Vec<Flag>> = [
        vec![Flag::None, Flag::Nothing],
        vec![Flag::Nothing, Flag::Nada],
    ]
    .into_iter()
    .collect();

    assert_eq!(LinkedList::<Vec<Flag>>::RANK, 2);

    let mut expected = count::encoded_size(2);
    for inner in &lv {
        expected += count::encoded_size(inner.len() as u64) + inner.len();
    }
    assert_eq!(lv.parse_size(), expected);
    roundtrip(&lv);
}

#[test]
fn deeply_nested_strings() {
    let vvv: Vec<Vec<Vec<String>>> = vec![
        vec![
            vec![String::from("000"), String::from("001")],
            vec![String::from("010"), String::from("011")],
        ],
        vec![
            vec![String::from("100"), String::from("101")],
            vec![String::from("110"), String::from("111")],
        ],
    ];

    // the string is a range itself
    assert_eq!(Vec::<Vec<Vec<String>>>::RANK, 4);

    let mut expected = count::encoded_size(vvv.len() as u64);
    for vv in &vvv {
        expected += count::encoded_size(vv.len() as u64);
        for v in vv {
            expected += count::encoded_size(v.len() as u64);
            for s in v {
                expected += count::encoded_size(s.len() as u64) + s.len();
            }
        }
    }
    assert_eq!(vvv.parse_size(), expected);
    roundtrip(&vvv);
}

#[test]
fn empty_ranges_still_carry_their_prefix() {
    let empty: Vec<u8> = Vec::new();
    assert_eq!(empty.parse_size(), count::encoded_size(0));
    roundtrip(&empty);

    // one empty sub-range: outer prefix plus inner prefix
    let nested: Vec<Vec<u8>> = vec![Vec::new()];
    assert_eq!(nested.parse_size(), count::encoded_size(1) + count::encoded_size(0));
    roundtrip(&nested);
}

#[test]
fn range_rank_recursion() {
    assert_eq!(u8::RANK, 0);
    assert_eq!(<(i32, f32)>::RANK, 0);
    assert_eq!(Vec::<u8>::RANK, u8::RANK + 1);
    assert_eq!(Vec::<Vec<u8>>::RANK, u8::RANK + 2);
    assert_eq!(String::RANK, 1);
    assert_eq!(Vec::<String>::RANK, 2);
    assert_eq!(BTreeMap::<String, u32>::RANK, 1);
}

#[test]
fn options() {
    roundtrip(&Some(42u32));
    roundtrip(&Option::<u32>::None);
    roundtrip(&Some(String::from("present")));
    roundtrip(&Some(Some(7u8)));
    roundtrip(&Some(Option::<u8>::None));

    assert_eq!(Option::<u32>::None.parse_size(), 1);
    assert_eq!(Some(42u32).parse_size(), 1 + 4);
}

#[test]
fn tuples_and_pairs() {
    let pair = (22i32, 14.0f32);
    assert_eq!(pair.parse_size(), 8);
    roundtrip(&pair);

    roundtrip(&(1u8, String::from("x"), 3.0f64));
    roundtrip(&(1u8, 2u16, 3u32, 4u64, 5i8, 6i16, 7i32, 8i64));
}

#[test]
fn arrays_are_products_without_a_prefix() {
    let arr = [7u16, 8, 9];
    assert_eq!(<[u16; 3]>::RANK, 0);
    assert_eq!(arr.parse_size(), 3 * size_of::<u16>());
    roundtrip(&arr);

    roundtrip(&[String::from("a"), String::from("bb")]);
}

#[test]
fn associative_ranges() {
    let mut map = BTreeMap::new();
    map.insert(String::from("alpha"), vec![1u8, 2]);
    map.insert(String::from("beta"), vec![3u8]);
    roundtrip(&map);

    let set: BTreeSet<u32> = [5, 3, 9].into_iter().collect();
    roundtrip(&set);
}

#[test]
fn chars_bools_and_unit() {
    roundtrip(&'ω');
    roundtrip(&true);
    roundtrip(&false);
    roundtrip(&());

    assert_eq!('ω'.parse_size(), 4);
    assert_eq!(().parse_size(), 0);
}

#[test]
fn mixed_compound_value() {
    let value: (Vec<Option<u32>>, String, [u8; 2]) = (
        vec![Some(1), None, Some(3)],
        String::from("tail"),
        [0xAA, 0xBB],
    );
    roundtrip(&value);
}
