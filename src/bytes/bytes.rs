//! Fragment-sequence byte container.

use super::fragment::Fragment;
use super::iter::ElementIter;
use super::reader::Reader;
use super::writer::Writer;
use crate::codec::{Decoder, DefaultCodec, Encoder};
use crate::error::DecodeError;
use smallvec::SmallVec;

/// An ordered sequence of [`Fragment`]s presented as one logical byte
/// stream.
///
/// The stream is the concatenation of the fragment contents in order; the
/// fragmentation itself is not observable through reads, equality, or
/// hashing. Cloning duplicates the fragment list — O(fragment count) — and
/// shares all backing storage; payload bytes are never copied.
///
/// A `Bytes` is mutated only through the exclusive [`Writer`] returned by
/// [`writer`](Bytes::writer); once the writer's borrow ends, any number of
/// [`Reader`]s observe exactly the bytes written, in write order.
///
/// # Examples
///
/// ```
/// use chainbuf::Bytes;
///
/// let mut b = Bytes::new();
/// let mut writer = b.writer();
/// writer.write_all(&[1, 2, 3]);
/// writer.append(vec![4, 5]);
///
/// assert_eq!(b.len(), 5);
/// assert_eq!(b.to_vec(), vec![1, 2, 3, 4, 5]);
/// ```
#[derive(Clone, Default)]
pub struct Bytes {
    /// Non-empty fragments in stream order.
    pub(super) fragments: SmallVec<[Fragment; 2]>,
    /// Sum of fragment lengths.
    pub(super) len: usize,
}

impl Bytes {
    /// Create an empty `Bytes`. No allocation occurs.
    #[must_use]
    pub fn new() -> Self {
        Bytes {
            fragments: SmallVec::new(),
            len: 0,
        }
    }

    /// Copy `data` into a freshly owned single-fragment `Bytes`.
    #[must_use]
    pub fn copy_from_slice(data: &[u8]) -> Self {
        Self::from(Fragment::copy_from_slice(data))
    }

    /// Returns the total number of bytes in the stream.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the stream holds no bytes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate the fragments in stream order.
    pub fn fragments(&self) -> std::slice::Iter<'_, Fragment> {
        self.fragments.iter()
    }

    /// Returns a zero-copy sub-stream for the given range.
    ///
    /// Edge fragments are sliced, interior fragments are shared whole; no
    /// payload bytes are copied.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    #[must_use]
    pub fn slice(&self, range: impl std::ops::RangeBounds<usize>) -> Self {
        use std::ops::Bound;

        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n.checked_add(1).expect("range start overflow"),
            Bound::Unbounded => 0,
        };

        let end = match range.end_bound() {
            Bound::Included(&n) => n.checked_add(1).expect("range end overflow"),
            Bound::Excluded(&n) => n,
            Bound::Unbounded => self.len,
        };

        assert!(
            start <= end && end <= self.len,
            "slice bounds out of range: start={start}, end={end}, len={}",
            self.len
        );

        let mut out = Self::new();
        let mut frag_start = 0;
        for frag in &self.fragments {
            let frag_end = frag_start + frag.len();
            if frag_end > start && frag_start < end {
                let lo = start.saturating_sub(frag_start);
                let hi = frag.len().min(end - frag_start);
                out.push_fragment(frag.slice(lo..hi));
            }
            frag_start = frag_end;
            if frag_start >= end {
                break;
            }
        }
        out
    }

    /// Flatten the stream into a contiguous vector, copying every byte.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for frag in &self.fragments {
            out.extend_from_slice(frag.as_slice());
        }
        out
    }

    /// Obtain the exclusive append cursor.
    ///
    /// The writer borrows this `Bytes` mutably for its whole scope, so no
    /// reader can observe the stream until the writer is gone.
    pub fn writer(&mut self) -> Writer<'_> {
        Writer::new(self)
    }

    /// Obtain a read cursor positioned at the start of the stream.
    ///
    /// Readers borrow the `Bytes` immutably; any number may coexist.
    #[must_use]
    pub fn reader(&self) -> Reader<'_> {
        Reader::new(self)
    }

    /// Iterate the bounded frames of a stream built by sequence
    /// serialization (see [`Bytes::serialize_iter`]).
    ///
    /// Each item is the sub-stream of one element, decodable on its own.
    /// The iterator is one-pass; call `iter()` again for a fresh scan.
    #[must_use]
    pub fn iter(&self) -> ElementIter<'_> {
        ElementIter::new(self.reader())
    }

    /// Encode `value` with the built-in codec.
    ///
    /// Owned byte-carrying values (`Vec<u8>`, `String`, `Bytes`) transfer
    /// their storage without copying; `Arc`-held blocks are shared.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbuf::Bytes;
    ///
    /// let b = Bytes::serialize(7u16);
    /// assert_eq!(b.to_vec(), vec![7, 0]); // little-endian, fixed width
    /// ```
    #[must_use]
    pub fn serialize<T>(value: T) -> Self
    where
        DefaultCodec: Encoder<T>,
    {
        <DefaultCodec as Encoder<T>>::encode(&DefaultCodec, value)
    }

    /// Encode `value` with a caller-supplied codec.
    #[must_use]
    pub fn serialize_with<C, T>(codec: &C, value: T) -> Self
    where
        C: Encoder<T>,
    {
        codec.encode(value)
    }

    /// Encode each element of `elements` as a bounded frame, in order.
    ///
    /// The result is decodable element-by-element through
    /// [`Bytes::iter`], or wholesale as a sequence type.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbuf::Bytes;
    ///
    /// let b = Bytes::serialize_iter(0u8..4);
    /// let decoded: Vec<u8> = b
    ///     .iter()
    ///     .map(|frame| frame.unwrap().deserialize::<u8>().unwrap())
    ///     .collect();
    /// assert_eq!(decoded, vec![0, 1, 2, 3]);
    /// ```
    #[must_use]
    pub fn serialize_iter<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        DefaultCodec: Encoder<T>,
    {
        let mut out = Self::new();
        let mut writer = out.writer();
        for element in elements {
            writer.append_bounded::<T>(element);
        }
        out
    }

    /// Decode this stream with the built-in codec.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbuf::Bytes;
    ///
    /// let b = Bytes::serialize(String::from("abc"));
    /// assert_eq!(b.deserialize::<String>().unwrap(), "abc");
    /// ```
    pub fn deserialize<T>(&self) -> Result<T, DecodeError>
    where
        DefaultCodec: Decoder<T, Error = DecodeError>,
    {
        DefaultCodec.decode(self)
    }

    /// Decode this stream with a caller-supplied codec.
    pub fn deserialize_with<C, T>(&self, codec: &C) -> Result<T, C::Error>
    where
        C: Decoder<T>,
    {
        codec.decode(self)
    }

    /// Append one fragment, keeping the no-empty-fragments invariant.
    pub(super) fn push_fragment(&mut self, fragment: Fragment) {
        if fragment.is_empty() {
            return;
        }
        self.len += fragment.len();
        self.fragments.push(fragment);
    }

    /// Append every fragment of `other`, in order, sharing storage.
    pub(super) fn splice(&mut self, other: Bytes) {
        self.len += other.len;
        self.fragments.extend(other.fragments);
    }
}

impl From<Fragment> for Bytes {
    fn from(fragment: Fragment) -> Self {
        let mut out = Self::new();
        out.push_fragment(fragment);
        out
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(data: Vec<u8>) -> Self {
        Self::from(Fragment::from_vec(data))
    }
}

impl From<String> for Bytes {
    fn from(data: String) -> Self {
        Self::from(data.into_bytes())
    }
}

impl From<&'static [u8]> for Bytes {
    fn from(data: &'static [u8]) -> Self {
        Self::from(Fragment::from_static(data))
    }
}

impl From<&'static str> for Bytes {
    fn from(data: &'static str) -> Self {
        Self::from(data.as_bytes())
    }
}

impl std::fmt::Debug for Bytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bytes")
            .field("len", &self.len)
            .field("fragments", &self.fragments.len())
            .field("data", &self.to_vec())
            .finish()
    }
}

impl PartialEq for Bytes {
    /// Streams compare equal iff their concatenated bytes are equal,
    /// regardless of how either side is fragmented.
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut lhs = self.fragments.iter().map(Fragment::as_slice);
        let mut rhs = other.fragments.iter().map(Fragment::as_slice);
        let mut a: &[u8] = &[];
        let mut b: &[u8] = &[];
        loop {
            if a.is_empty() {
                a = match lhs.next() {
                    Some(next) => next,
                    // Lengths match, so the right side is drained too.
                    None => return true,
                };
            }
            if b.is_empty() {
                b = match rhs.next() {
                    Some(next) => next,
                    None => return false,
                };
            }
            let n = a.len().min(b.len());
            if a[..n] != b[..n] {
                return false;
            }
            a = &a[n..];
            b = &b[n..];
        }
    }
}

impl Eq for Bytes {}

impl PartialEq<[u8]> for Bytes {
    fn eq(&self, other: &[u8]) -> bool {
        if self.len != other.len() {
            return false;
        }
        let mut offset = 0;
        self.fragments.iter().all(|frag| {
            let chunk = frag.as_slice();
            let matches = &other[offset..offset + chunk.len()] == chunk;
            offset += chunk.len();
            matches
        })
    }
}

impl PartialEq<Bytes> for [u8] {
    fn eq(&self, other: &Bytes) -> bool {
        other == self
    }
}

impl PartialEq<Vec<u8>> for Bytes {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self == other.as_slice()
    }
}

impl std::hash::Hash for Bytes {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        // Byte at a time, so equal streams hash equally no matter how
        // either is fragmented.
        for frag in &self.fragments {
            for &byte in frag.as_slice() {
                state.write_u8(byte);
            }
        }
    }
}
