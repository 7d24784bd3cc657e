//! Codec traits and the built-in default codec.
//!
//! A codec is the capability pairing "encode a value of type `T` into
//! [`Bytes`]" / "decode [`Bytes`] back into `T`", split across the
//! [`Encoder`] and [`Decoder`] traits. Dispatch is static: a codec is an
//! ordinary (usually zero-sized) type implementing the traits for the
//! value types it understands, selected at compile time.
//!
//! [`DefaultCodec`] covers the built-in universe — fixed-width arithmetic,
//! strings, raw byte buffers, sequences, sets, maps, pairs, and
//! shared-ownership wrappers. User types plug in by defining their own
//! codec type and passing it to [`Bytes::serialize_with`] and
//! [`Bytes::deserialize_with`]:
//!
//! ```
//! use chainbuf::{Bytes, DecodeError, Decoder, Encoder};
//!
//! struct Celsius(f64);
//! struct WeatherCodec;
//!
//! impl Encoder<&Celsius> for WeatherCodec {
//!     fn encode(&self, value: &Celsius) -> Bytes {
//!         Bytes::serialize(value.0)
//!     }
//! }
//!
//! impl Decoder<Celsius> for WeatherCodec {
//!     type Error = DecodeError;
//!     fn decode(&self, bytes: &Bytes) -> Result<Celsius, DecodeError> {
//!         bytes.deserialize().map(Celsius)
//!     }
//! }
//!
//! let b = Bytes::serialize_with(&WeatherCodec, &Celsius(21.5));
//! let back: Celsius = b.deserialize_with(&WeatherCodec).unwrap();
//! assert_eq!(back.0, 21.5);
//! ```

mod default;

use crate::bytes::Bytes;

/// Encode values of type `T` into a [`Bytes`] stream.
///
/// Encoding is total: every value of an implemented type has an encoding,
/// and running out of memory aborts rather than failing recoverably.
///
/// Implementations are provided per *value shape*: `Encoder<T>` consumes
/// the value (letting owned heap storage transfer into the stream without
/// copying), while `Encoder<&T>` copies out of a borrow.
pub trait Encoder<T> {
    /// Encode `value` into a fresh stream.
    fn encode(&self, value: T) -> Bytes;
}

/// Decode values of type `T` from a [`Bytes`] stream.
///
/// Decoding is fallible: implementations must report malformed or
/// undersized input through `Err`, never substitute a default value.
pub trait Decoder<T> {
    /// Error produced on malformed input.
    type Error;

    /// Decode a value from the whole of `bytes`.
    fn decode(&self, bytes: &Bytes) -> Result<T, Self::Error>;
}

/// The built-in codec.
///
/// Covers:
///
/// - fixed-width arithmetic (`u8`–`u128`, `i8`–`i128`, `f32`, `f64`),
///   little-endian, width = the type's byte size;
/// - `String`/`&str` and `Vec<u8>`/`&[u8]`/[`Bytes`] as raw bytes with no
///   embedded length (the enclosing stream or bounded frame delimits
///   them);
/// - sequences, sets, and maps as concatenations of bounded frames;
/// - pairs as two bounded frames in declaration order;
/// - `Arc<Vec<u8>>`/`Arc<String>` by sharing the backing block.
///
/// Owned impls (`Encoder<T>`) transfer heap storage into the stream;
/// borrowed impls (`Encoder<&T>`) copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultCodec;
