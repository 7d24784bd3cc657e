//! Fragment buffers and their cursors.
//!
//! # Overview
//!
//! This module provides:
//! - [`Bytes`]: an ordered fragment sequence viewed as one byte stream
//! - [`Fragment`]: one contiguous owned-or-shared run of bytes
//! - [`Writer`]: the exclusive append cursor
//! - [`Reader`]: the shared read cursor
//! - [`ElementIter`]: lazy iteration over length-framed elements
//!
//! # Design Notes
//!
//! The container never flattens: composition splices fragment lists and
//! decomposition slices views, so the cost of moving payloads around is
//! proportional to the number of fragments, not the number of bytes.
//! Shared storage is plain `Arc`; dropping the last view of a block frees
//! it, and the counts are atomic, so whole `Bytes` values can be handed
//! between threads freely.
//!
//! Cursor exclusivity follows borrow rules instead of runtime guards: a
//! [`Writer`] takes `&mut Bytes`, a [`Reader`] takes `&Bytes`. One writer
//! with no readers, or any number of readers with no writer — checked at
//! compile time.

mod bytes;
mod fragment;
mod iter;
mod reader;
mod writer;

pub use bytes::Bytes;
pub use fragment::{Fragment, SharedStorage};
pub use iter::ElementIter;
pub use reader::Reader;
pub use writer::Writer;
