//! Chainbuf: composable fragment buffers with pluggable type codecs.
//!
//! # Overview
//!
//! Chainbuf provides a byte container built from *fragments* — contiguous
//! runs of bytes that are either owned by the container or shared with an
//! external holder through reference counting. A [`Bytes`] value is an
//! ordered sequence of such fragments presented as one logical byte stream.
//! Composition and decomposition never flatten the stream: appending an
//! existing buffer splices its fragments, and carving out a sub-range
//! produces views onto the same storage.
//!
//! On top of the container sit three cursors and a codec seam:
//!
//! - [`Writer`]: an exclusive append cursor obtained from
//!   [`Bytes::writer`]. Supports copying writes, ownership-transfer and
//!   shared-ownership appends, and length-framed sub-messages.
//! - [`Reader`]: a shared read cursor obtained from [`Bytes::reader`], with
//!   sequential reads, absolute and relative seeking, and zero-copy
//!   extraction of length-framed sub-messages.
//! - [`ElementIter`]: a lazy iterator over the length-framed elements of a
//!   stream produced by sequence serialization.
//! - [`Encoder`]/[`Decoder`]: the capability pairing "encode a value of
//!   type `T` into [`Bytes`]" / "decode [`Bytes`] back into `T`".
//!   [`DefaultCodec`] covers fixed-width arithmetic, strings, raw byte
//!   buffers, sequences, sets, maps, pairs, and shared-ownership wrappers;
//!   user types plug in their own codec through the same traits.
//!
//! # Core Guarantees
//!
//! - **Write order is stream order**: fragments appear exactly in the order
//!   the writer operations produced them; nothing is reordered or merged.
//! - **Zero-copy by default**: cloning a [`Bytes`], appending an owned
//!   buffer, sharing an external buffer, and slicing out a bounded frame
//!   all avoid copying payload bytes.
//! - **Exclusive writer, shared readers**: a [`Writer`] holds a mutable
//!   borrow of its [`Bytes`], so the borrow checker rules out concurrent
//!   readers; any number of [`Reader`]s may coexist afterwards.
//! - **Explicit decode errors**: malformed or truncated input surfaces as a
//!   [`DecodeError`]; short reads at end of stream are not errors.
//!
//! # Example
//!
//! ```
//! use chainbuf::Bytes;
//!
//! let mut payload = Bytes::new();
//! let mut writer = payload.writer();
//! writer.write_all(b"hello ");
//! writer.append(b"world".to_vec()); // ownership transfer, no copy
//!
//! let mut reader = payload.reader();
//! let mut out = [0u8; 11];
//! assert_eq!(reader.read(&mut out), 11);
//! assert_eq!(&out, b"hello world");
//! ```
//!
//! # Module Structure
//!
//! - [`bytes`]: the [`Bytes`] container, [`Fragment`] storage, cursors
//! - [`codec`]: [`Encoder`]/[`Decoder`] traits and the built-in codec
//! - [`error`]: decode and seek error types
//! - [`test_utils`]: tracing-based logging helpers for tests

#![recursion_limit = "1024"]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_inception)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]

pub mod bytes;
pub mod codec;
pub mod error;
pub mod test_utils;

mod varint;

pub use bytes::{Bytes, ElementIter, Fragment, Reader, SharedStorage, Writer};
pub use codec::{Decoder, DefaultCodec, Encoder};
pub use error::{DecodeError, SeekError};
