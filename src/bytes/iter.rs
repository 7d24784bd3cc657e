//! Lazy iteration over length-framed elements.

use super::bytes::Bytes;
use super::reader::Reader;
use crate::error::DecodeError;
use std::iter::FusedIterator;

/// Iterator over the bounded frames of a [`Bytes`] stream.
///
/// Produced by [`Bytes::iter`] for streams built from homogeneous bounded
/// elements (see [`Bytes::serialize_iter`] and sequence serialization).
/// Each item is a zero-copy sub-stream holding exactly one element, which
/// can be decoded with any codec independently of the others.
///
/// The iterator is one-pass and finite: it ends when the underlying cursor
/// reaches the end of the stream, and it fuses after yielding a malformed
/// frame. Create a fresh iterator to scan again.
#[derive(Debug, Clone)]
pub struct ElementIter<'a> {
    reader: Reader<'a>,
    failed: bool,
}

impl<'a> ElementIter<'a> {
    pub(super) fn new(reader: Reader<'a>) -> Self {
        ElementIter {
            reader,
            failed: false,
        }
    }
}

impl Iterator for ElementIter<'_> {
    type Item = Result<Bytes, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.remaining() == 0 {
            return None;
        }
        let element = self.reader.read_bounded();
        self.failed = element.is_err();
        Some(element)
    }
}

impl FusedIterator for ElementIter<'_> {}
