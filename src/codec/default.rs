//! `DefaultCodec` implementations for the built-in type universe.
//!
//! Three encoding families:
//!
//! - **Fixed width**: arithmetic types encode little-endian at exactly
//!   their byte size; decoding demands that exact size. `usize`/`isize`
//!   are deliberately absent — their width is platform-dependent, so they
//!   have no stable wire form.
//! - **Raw bytes**: `String`, `Vec<u8>`, `&str`, `&[u8]`, and [`Bytes`]
//!   itself encode as their bytes with no embedded length; the enclosing
//!   stream or bounded frame delimits them. Owned values transfer their
//!   heap storage into the stream, borrowed values copy.
//! - **Framed elements**: containers encode as a concatenation of bounded
//!   frames, one per element (for maps: key frame, value frame, repeated),
//!   so decoding recovers element boundaries with no external metadata.
//!
//! `Vec<u8>` belongs to the raw family, so the framed `Vec<T>` impls are
//! enumerated per element type rather than written as a blanket; use
//! [`Bytes`] as the element type for lists of raw byte payloads. The other
//! containers (`VecDeque`, sets, maps, pairs) are generic over any
//! encodable element, `u8` included.

use super::{Decoder, DefaultCodec, Encoder};
use crate::bytes::{Bytes, Fragment};
use crate::error::DecodeError;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::mem::size_of;
use std::sync::Arc;

// === Fixed-width arithmetic ===

macro_rules! impl_fixed_width {
    ($($ty:ty),* $(,)?) => {$(
        impl Encoder<$ty> for DefaultCodec {
            fn encode(&self, value: $ty) -> Bytes {
                Bytes::from(Fragment::from_vec(value.to_le_bytes().to_vec()))
            }
        }

        impl<'a> Encoder<&'a $ty> for DefaultCodec {
            fn encode(&self, value: &'a $ty) -> Bytes {
                <Self as Encoder<$ty>>::encode(self, *value)
            }
        }

        impl Decoder<$ty> for DefaultCodec {
            type Error = DecodeError;

            fn decode(&self, bytes: &Bytes) -> Result<$ty, DecodeError> {
                const WIDTH: usize = size_of::<$ty>();
                if bytes.len() != WIDTH {
                    return Err(DecodeError::SizeMismatch {
                        expected: WIDTH,
                        actual: bytes.len(),
                        type_name: stringify!($ty),
                    });
                }
                let mut raw = [0u8; WIDTH];
                bytes.reader().read(&mut raw);
                Ok(<$ty>::from_le_bytes(raw))
            }
        }
    )*};
}

impl_fixed_width!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

// === Raw byte payloads ===

impl Encoder<String> for DefaultCodec {
    fn encode(&self, value: String) -> Bytes {
        Bytes::from(value)
    }
}

impl<'a> Encoder<&'a String> for DefaultCodec {
    fn encode(&self, value: &'a String) -> Bytes {
        <Self as Encoder<&str>>::encode(self, value.as_str())
    }
}

impl<'a> Encoder<&'a str> for DefaultCodec {
    fn encode(&self, value: &'a str) -> Bytes {
        Bytes::copy_from_slice(value.as_bytes())
    }
}

impl Decoder<String> for DefaultCodec {
    type Error = DecodeError;

    fn decode(&self, bytes: &Bytes) -> Result<String, DecodeError> {
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

impl Encoder<Vec<u8>> for DefaultCodec {
    fn encode(&self, value: Vec<u8>) -> Bytes {
        Bytes::from(value)
    }
}

impl<'a> Encoder<&'a Vec<u8>> for DefaultCodec {
    fn encode(&self, value: &'a Vec<u8>) -> Bytes {
        Bytes::copy_from_slice(value)
    }
}

impl<'a> Encoder<&'a [u8]> for DefaultCodec {
    fn encode(&self, value: &'a [u8]) -> Bytes {
        Bytes::copy_from_slice(value)
    }
}

impl Decoder<Vec<u8>> for DefaultCodec {
    type Error = DecodeError;

    fn decode(&self, bytes: &Bytes) -> Result<Vec<u8>, DecodeError> {
        Ok(bytes.to_vec())
    }
}

impl Encoder<Bytes> for DefaultCodec {
    fn encode(&self, value: Bytes) -> Bytes {
        value
    }
}

impl<'a> Encoder<&'a Bytes> for DefaultCodec {
    fn encode(&self, value: &'a Bytes) -> Bytes {
        value.clone()
    }
}

impl Decoder<Bytes> for DefaultCodec {
    type Error = DecodeError;

    fn decode(&self, bytes: &Bytes) -> Result<Bytes, DecodeError> {
        Ok(bytes.clone())
    }
}

// === Shared-ownership wrappers ===
//
// Serializing an `Arc`-held block never copies it: the stream holds one
// more strong reference until it is dropped. Wrappers around other types
// serialize through a deref (`Bytes::serialize(&*arc)`).

impl Encoder<Arc<Vec<u8>>> for DefaultCodec {
    fn encode(&self, value: Arc<Vec<u8>>) -> Bytes {
        Bytes::from(Fragment::from_shared(value))
    }
}

impl<'a> Encoder<&'a Arc<Vec<u8>>> for DefaultCodec {
    fn encode(&self, value: &'a Arc<Vec<u8>>) -> Bytes {
        Bytes::from(Fragment::from_shared(Arc::clone(value)))
    }
}

impl Encoder<Arc<String>> for DefaultCodec {
    fn encode(&self, value: Arc<String>) -> Bytes {
        Bytes::from(Fragment::from_shared(value))
    }
}

impl<'a> Encoder<&'a Arc<String>> for DefaultCodec {
    fn encode(&self, value: &'a Arc<String>) -> Bytes {
        Bytes::from(Fragment::from_shared(Arc::clone(value)))
    }
}

// === Framed element sequences ===

// `Vec<u8>` owns the raw-bytes encoding above, so these impls are
// enumerated per element type instead of blanket over `T`.
macro_rules! impl_framed_vec {
    ($($ty:ty),* $(,)?) => {$(
        impl Encoder<Vec<$ty>> for DefaultCodec {
            fn encode(&self, value: Vec<$ty>) -> Bytes {
                Bytes::serialize_iter::<_, $ty>(value)
            }
        }

        impl<'a> Encoder<&'a Vec<$ty>> for DefaultCodec {
            fn encode(&self, value: &'a Vec<$ty>) -> Bytes {
                Bytes::serialize_iter::<_, &$ty>(value.iter())
            }
        }

        impl Decoder<Vec<$ty>> for DefaultCodec {
            type Error = DecodeError;

            fn decode(&self, bytes: &Bytes) -> Result<Vec<$ty>, DecodeError> {
                bytes
                    .iter()
                    .map(|frame| frame.and_then(|b| b.deserialize::<$ty>()))
                    .collect()
            }
        }
    )*};
}

impl_framed_vec!(u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64, String, Bytes);

impl<T> Encoder<VecDeque<T>> for DefaultCodec
where
    DefaultCodec: Encoder<T>,
{
    fn encode(&self, value: VecDeque<T>) -> Bytes {
        Bytes::serialize_iter::<_, T>(value)
    }
}

impl<'a, T> Encoder<&'a VecDeque<T>> for DefaultCodec
where
    DefaultCodec: Encoder<&'a T>,
{
    fn encode(&self, value: &'a VecDeque<T>) -> Bytes {
        Bytes::serialize_iter::<_, &T>(value.iter())
    }
}

impl<T> Decoder<VecDeque<T>> for DefaultCodec
where
    DefaultCodec: Decoder<T, Error = DecodeError>,
{
    type Error = DecodeError;

    fn decode(&self, bytes: &Bytes) -> Result<VecDeque<T>, DecodeError> {
        bytes
            .iter()
            .map(|frame| frame.and_then(|b| b.deserialize::<T>()))
            .collect()
    }
}

// === Sets ===

impl<T> Encoder<HashSet<T>> for DefaultCodec
where
    DefaultCodec: Encoder<T>,
{
    fn encode(&self, value: HashSet<T>) -> Bytes {
        Bytes::serialize_iter::<_, T>(value)
    }
}

impl<'a, T> Encoder<&'a HashSet<T>> for DefaultCodec
where
    DefaultCodec: Encoder<&'a T>,
{
    fn encode(&self, value: &'a HashSet<T>) -> Bytes {
        Bytes::serialize_iter::<_, &T>(value.iter())
    }
}

impl<T> Decoder<HashSet<T>> for DefaultCodec
where
    T: Eq + Hash,
    DefaultCodec: Decoder<T, Error = DecodeError>,
{
    type Error = DecodeError;

    fn decode(&self, bytes: &Bytes) -> Result<HashSet<T>, DecodeError> {
        bytes
            .iter()
            .map(|frame| frame.and_then(|b| b.deserialize::<T>()))
            .collect()
    }
}

impl<T> Encoder<BTreeSet<T>> for DefaultCodec
where
    DefaultCodec: Encoder<T>,
{
    fn encode(&self, value: BTreeSet<T>) -> Bytes {
        Bytes::serialize_iter::<_, T>(value)
    }
}

impl<'a, T> Encoder<&'a BTreeSet<T>> for DefaultCodec
where
    DefaultCodec: Encoder<&'a T>,
{
    fn encode(&self, value: &'a BTreeSet<T>) -> Bytes {
        Bytes::serialize_iter::<_, &T>(value.iter())
    }
}

impl<T> Decoder<BTreeSet<T>> for DefaultCodec
where
    T: Ord,
    DefaultCodec: Decoder<T, Error = DecodeError>,
{
    type Error = DecodeError;

    fn decode(&self, bytes: &Bytes) -> Result<BTreeSet<T>, DecodeError> {
        bytes
            .iter()
            .map(|frame| frame.and_then(|b| b.deserialize()))
            .collect()
    }
}

// === Maps ===
//
// Wire form: bounded key frame, bounded value frame, repeated. Iteration
// order is whatever the map yields; decoding re-collects, so round-trips
// are order-independent.

macro_rules! impl_map {
    ($map:ident, $($bound:tt)+) => {
        impl<K, V> Encoder<$map<K, V>> for DefaultCodec
        where
            DefaultCodec: Encoder<K> + Encoder<V>,
        {
            fn encode(&self, value: $map<K, V>) -> Bytes {
                let mut out = Bytes::new();
                let mut writer = out.writer();
                for (key, entry) in value {
                    writer.append_bounded(key);
                    writer.append_bounded(entry);
                }
                out
            }
        }

        impl<'a, K, V> Encoder<&'a $map<K, V>> for DefaultCodec
        where
            DefaultCodec: Encoder<&'a K> + Encoder<&'a V>,
        {
            fn encode(&self, value: &'a $map<K, V>) -> Bytes {
                let mut out = Bytes::new();
                let mut writer = out.writer();
                for (key, entry) in value {
                    writer.append_bounded(key);
                    writer.append_bounded(entry);
                }
                out
            }
        }

        impl<K, V> Decoder<$map<K, V>> for DefaultCodec
        where
            K: $($bound)+,
            DefaultCodec: Decoder<K, Error = DecodeError> + Decoder<V, Error = DecodeError>,
        {
            type Error = DecodeError;

            fn decode(&self, bytes: &Bytes) -> Result<$map<K, V>, DecodeError> {
                let mut reader = bytes.reader();
                let mut out = $map::new();
                while reader.remaining() > 0 {
                    let key = reader.read_bounded()?;
                    let entry = reader.read_bounded()?;
                    out.insert(key.deserialize()?, entry.deserialize()?);
                }
                Ok(out)
            }
        }
    };
}

impl_map!(HashMap, Eq + Hash);
impl_map!(BTreeMap, Ord);

// === Pairs ===

impl<A, B> Encoder<(A, B)> for DefaultCodec
where
    DefaultCodec: Encoder<A> + Encoder<B>,
{
    fn encode(&self, value: (A, B)) -> Bytes {
        let mut out = Bytes::new();
        let mut writer = out.writer();
        writer.append_bounded(value.0);
        writer.append_bounded(value.1);
        out
    }
}

impl<'a, A, B> Encoder<&'a (A, B)> for DefaultCodec
where
    DefaultCodec: Encoder<&'a A> + Encoder<&'a B>,
{
    fn encode(&self, value: &'a (A, B)) -> Bytes {
        let mut out = Bytes::new();
        let mut writer = out.writer();
        writer.append_bounded(&value.0);
        writer.append_bounded(&value.1);
        out
    }
}

impl<A, B> Decoder<(A, B)> for DefaultCodec
where
    DefaultCodec: Decoder<A, Error = DecodeError> + Decoder<B, Error = DecodeError>,
{
    type Error = DecodeError;

    fn decode(&self, bytes: &Bytes) -> Result<(A, B), DecodeError> {
        let mut reader = bytes.reader();
        let first = reader.read_bounded()?;
        let second = reader.read_bounded()?;
        if reader.remaining() > 0 {
            return Err(DecodeError::TrailingBytes {
                remaining: reader.remaining(),
            });
        }
        Ok((first.deserialize()?, second.deserialize()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    macro_rules! assert_round_trip {
        ($ty:ty, $value:expr) => {{
            let value: $ty = $value;
            let encoded = Bytes::serialize(value.clone());
            let decoded = encoded.deserialize::<$ty>().unwrap();
            assert_eq!(decoded, value);
        }};
    }

    #[test]
    fn arithmetic_round_trips() {
        init_test("arithmetic_round_trips");
        assert_round_trip!(u8, 5);
        assert_round_trip!(u16, 500);
        assert_round_trip!(u32, 50_000);
        assert_round_trip!(u64, 500_000_000_000);
        assert_round_trip!(u128, u128::MAX - 1);
        assert_round_trip!(i8, -5);
        assert_round_trip!(i16, 500);
        assert_round_trip!(i32, -50_000);
        assert_round_trip!(i64, -500_000_000_000);
        assert_round_trip!(i128, i128::MIN + 1);
        assert_round_trip!(f32, 0.5);
        assert_round_trip!(f64, 123.45);
        crate::test_complete!("arithmetic_round_trips");
    }

    #[test]
    fn arithmetic_wire_format_is_little_endian() {
        assert_eq!(Bytes::serialize(0x1234u16).to_vec(), vec![0x34, 0x12]);
        assert_eq!(
            Bytes::serialize(-2i32).to_vec(),
            vec![0xfe, 0xff, 0xff, 0xff]
        );
        assert_eq!(Bytes::serialize(1u64).len(), 8);
    }

    #[test]
    fn arithmetic_rejects_wrong_width() {
        let b = Bytes::from(vec![1u8, 2, 3]);
        assert_eq!(
            b.deserialize::<u32>(),
            Err(DecodeError::SizeMismatch {
                expected: 4,
                actual: 3,
                type_name: "u32",
            })
        );
    }

    #[test]
    fn string_round_trips() {
        assert_round_trip!(String, String::from("abc"));
        assert_round_trip!(String, String::new());
        assert_round_trip!(String, String::from("héllo wörld 🌍"));

        // Borrowed form copies; owned form moves.
        let s = String::from("abc");
        let b = Bytes::serialize(&s);
        assert!(!s.is_empty());
        assert_eq!(b.deserialize::<String>().unwrap(), s);
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        let b = Bytes::from(vec![0xff, 0xfe]);
        assert!(matches!(
            b.deserialize::<String>(),
            Err(DecodeError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn byte_buffers_are_raw() {
        let data: Vec<u8> = (0..10).collect();

        let b = Bytes::serialize(&data);
        assert_eq!(b.len(), 10);
        assert_eq!(b.deserialize::<Vec<u8>>().unwrap(), data);

        // Ownership transfer keeps the same bytes without copying.
        let b = Bytes::serialize(data.clone());
        assert_eq!(b.deserialize::<Vec<u8>>().unwrap(), data);

        assert_round_trip!(Bytes, Bytes::from(vec![9u8, 9, 9]));
    }

    #[test]
    fn framed_vec_round_trips() {
        init_test("framed_vec_round_trips");
        assert_round_trip!(Vec<f32>, vec![0.1, 0.2, 0.3]);
        assert_round_trip!(Vec<i64>, vec![-1, 0, 1]);
        assert_round_trip!(Vec<String>, vec!["a".into(), String::new(), "abc".into()]);
        assert_round_trip!(Vec<f32>, Vec::new());
        crate::test_complete!("framed_vec_round_trips");
    }

    #[test]
    fn owned_vec_moves_elements() {
        let v = vec![String::from("left"), String::from("right")];
        let expected = v.clone();
        let b = Bytes::serialize(v);
        assert_eq!(b.deserialize::<Vec<String>>().unwrap(), expected);
    }

    #[test]
    fn deque_round_trips_including_u8() {
        assert_round_trip!(VecDeque<f64>, VecDeque::from([0.5, -0.25]));
        assert_round_trip!(VecDeque<u8>, VecDeque::from([1, 2, 3]));
    }

    #[test]
    fn set_round_trips() {
        assert_round_trip!(HashSet<u8>, HashSet::from([1, 2, 3, 4, 0]));
        assert_round_trip!(BTreeSet<String>, BTreeSet::from(["b".into(), "a".into()]));
    }

    #[test]
    fn map_round_trips_regardless_of_order() {
        init_test("map_round_trips_regardless_of_order");
        let map = HashMap::from([
            (String::from("a"), 0.5f64),
            (String::from("b"), -123.45),
            (String::from("abc"), 3.141_592_6),
        ]);
        assert_round_trip!(HashMap<String, f64>, map);
        crate::test_complete!("map_round_trips_regardless_of_order");
    }

    #[test]
    fn nested_containers_round_trip() {
        let map = BTreeMap::from([
            (String::from("a"), VecDeque::from([0.5, 0.2])),
            (String::from("b"), VecDeque::from([-123.45, 0.4])),
            (String::from("abc"), VecDeque::from([3.141_592_6, -1.0])),
        ]);
        assert_round_trip!(BTreeMap<String, VecDeque<f64>>, map);
    }

    #[test]
    fn pair_round_trips() {
        assert_round_trip!((i32, String), (-12, String::from("123")));

        let pair = (7u8, vec![0.5f32]);
        let b = Bytes::serialize(&pair);
        assert_eq!(b.deserialize::<(u8, Vec<f32>)>().unwrap(), pair);
    }

    #[test]
    fn pair_rejects_trailing_bytes() {
        let mut b = Bytes::serialize((1u8, 2u8));
        b.writer().write_all(&[0]);
        assert_eq!(
            b.deserialize::<(u8, u8)>(),
            Err(DecodeError::TrailingBytes { remaining: 1 })
        );
    }

    #[test]
    fn shared_blocks_are_not_copied() {
        let block = Arc::new(vec![1u8, 2, 3, 4, 5]);

        let b = Bytes::serialize(&block);
        assert_eq!(Arc::strong_count(&block), 2);
        assert_eq!(b.deserialize::<Vec<u8>>().unwrap(), *block);

        let copy = b.clone();
        assert_eq!(Arc::strong_count(&block), 3);

        drop(b);
        drop(copy);
        assert_eq!(Arc::strong_count(&block), 1);
    }

    #[test]
    fn shared_string_blocks() {
        let text = Arc::new(String::from("shared text"));
        let b = Bytes::serialize(Arc::clone(&text));
        assert_eq!(Arc::strong_count(&text), 2);
        assert_eq!(b.deserialize::<String>().unwrap(), *text);
        drop(b);
        assert_eq!(Arc::strong_count(&text), 1);
    }

    #[test]
    fn map_decode_propagates_element_errors() {
        // Key frame holds two bytes, decoded as u32: wrong width.
        let mut b = Bytes::new();
        let mut writer = b.writer();
        writer.append_bounded(7u16);
        writer.append_bounded(1u8);
        drop(writer);

        assert!(matches!(
            b.deserialize::<HashMap<u32, u8>>(),
            Err(DecodeError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn map_decode_detects_missing_value_frame() {
        let mut b = Bytes::new();
        b.writer().append_bounded(1u8);
        assert_eq!(
            b.deserialize::<HashMap<u8, u8>>(),
            Err(DecodeError::TruncatedPrefix)
        );
    }
}
