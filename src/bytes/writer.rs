//! Exclusive append cursor.

use super::bytes::Bytes;
use super::fragment::{Fragment, SharedStorage};
use crate::codec::{DefaultCodec, Encoder};
use crate::varint;
use std::sync::Arc;

/// Exclusive append cursor over a [`Bytes`] value.
///
/// A writer is obtained from [`Bytes::writer`] and holds a mutable borrow
/// for its whole scope: the borrow checker guarantees no reader (and no
/// second writer) can touch the stream until the writer is gone.
///
/// Every operation appends one or more fragments; fragments land in the
/// exact order of the calls that produced them and are never merged or
/// reordered.
///
/// # Examples
///
/// ```
/// use chainbuf::Bytes;
///
/// let mut b = Bytes::new();
/// let mut writer = b.writer();
/// writer.write_all(b"head");        // copied
/// writer.append(b"tail".to_vec()); // ownership transfer
///
/// assert_eq!(b.to_vec(), b"headtail".to_vec());
/// ```
#[derive(Debug)]
pub struct Writer<'a> {
    bytes: &'a mut Bytes,
}

impl<'a> Writer<'a> {
    pub(super) fn new(bytes: &'a mut Bytes) -> Self {
        Writer { bytes }
    }

    /// Copy `data` into a new owned fragment at the end of the stream.
    ///
    /// Writing an empty slice appends nothing.
    pub fn write_all(&mut self, data: &[u8]) {
        if !data.is_empty() {
            self.bytes.push_fragment(Fragment::copy_from_slice(data));
        }
    }

    /// Transfer ownership of an existing buffer into the stream.
    ///
    /// Accepts anything convertible to [`Bytes`]: `Vec<u8>` and `String`
    /// move their heap storage without copying, a [`Fragment`] is appended
    /// as-is, and another [`Bytes`] has its fragments spliced in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbuf::Bytes;
    ///
    /// let mut b = Bytes::new();
    /// let mut writer = b.writer();
    /// writer.append(vec![1u8, 2, 3]);
    /// writer.append(Bytes::from(vec![4u8, 5]));
    /// assert_eq!(b.to_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn append(&mut self, data: impl Into<Bytes>) {
        self.bytes.splice(data.into());
    }

    /// Append a fragment sharing ownership of an externally-held block.
    ///
    /// The block's reference count rises by one for as long as this stream
    /// (or any stream sliced from it) is alive; the caller's handle stays
    /// valid and usable. No bytes are copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbuf::Bytes;
    /// use std::sync::Arc;
    ///
    /// let block = Arc::new(vec![1u8, 2, 3]);
    /// let mut b = Bytes::new();
    /// b.writer().append_shared(&block);
    ///
    /// assert_eq!(Arc::strong_count(&block), 2);
    /// drop(b);
    /// assert_eq!(Arc::strong_count(&block), 1);
    /// ```
    pub fn append_shared<T: SharedStorage>(&mut self, data: &Arc<T>) {
        self.bytes
            .push_fragment(Fragment::from_shared(Arc::clone(data)));
    }

    /// Encode `value` with the built-in codec and append it as a bounded
    /// frame: a ULEB128 length prefix followed by the encoded payload.
    ///
    /// The frame is recoverable later with
    /// [`Reader::read_bounded`](super::Reader::read_bounded) regardless of
    /// what else follows it in the stream.
    pub fn append_bounded<T>(&mut self, value: T)
    where
        DefaultCodec: Encoder<T>,
    {
        self.append_bounded_with::<DefaultCodec, T>(&DefaultCodec, value);
    }

    /// Encode `value` with a caller-supplied codec and append it as a
    /// bounded frame.
    ///
    /// The payload is encoded into a temporary [`Bytes`] whose fragments
    /// are spliced in after the prefix; payload bytes are not copied.
    pub fn append_bounded_with<C, T>(&mut self, codec: &C, value: T)
    where
        C: Encoder<T>,
    {
        let payload = codec.encode(value);
        let mut prefix = [0u8; varint::MAX_LEN];
        let prefix_len = varint::encode(payload.len() as u64, &mut prefix);
        self.write_all(&prefix[..prefix_len]);
        self.append(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_all_copies() {
        let mut source = vec![1u8, 2, 3];
        let mut b = Bytes::new();
        b.writer().write_all(&source);

        // The stream owns its copy; the source can change freely.
        source[0] = 99;
        assert_eq!(b.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn empty_write_appends_nothing() {
        let mut b = Bytes::new();
        let mut writer = b.writer();
        writer.write_all(&[]);
        writer.append(Vec::new());
        assert!(b.is_empty());
        assert_eq!(b.fragments().len(), 0);
    }

    #[test]
    fn fragments_keep_call_order() {
        let mut b = Bytes::new();
        let mut writer = b.writer();
        writer.write_all(&[1]);
        writer.append(vec![2]);
        writer.write_all(&[3]);

        assert_eq!(b.fragments().len(), 3);
        assert_eq!(b.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn append_splices_fragments() {
        let mut inner = Bytes::new();
        {
            let mut writer = inner.writer();
            writer.write_all(&[1, 2]);
            writer.write_all(&[3]);
        }

        let mut outer = Bytes::new();
        let mut writer = outer.writer();
        writer.write_all(&[0]);
        writer.append(inner);

        assert_eq!(outer.fragments().len(), 3);
        assert_eq!(outer.to_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn append_shared_leaves_source_usable() {
        let block = Arc::new(b"shared".to_vec());
        let mut b = Bytes::new();
        b.writer().append_shared(&block);

        assert_eq!(Arc::strong_count(&block), 2);
        assert_eq!(block.as_slice(), b"shared");
        assert_eq!(b.to_vec(), b"shared".to_vec());
    }

    #[test]
    fn bounded_frame_layout() {
        let mut b = Bytes::new();
        b.writer().append_bounded(0.5f32);

        // One prefix byte (length 4) then the little-endian payload.
        assert_eq!(b.to_vec(), vec![4, 0x00, 0x00, 0x00, 0x3f]);
    }
}
